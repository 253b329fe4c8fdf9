use crate::document::PdfDocument;

impl PdfDocument {
    /// Load a PDF from memory and extract its text, pages in order.
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<Self, String> {
        let document = lopdf::Document::load_mem(bytes)
            .map_err(|error| format!("failed reading pdf '{name}': {error}"))?;
        let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
        let text = if page_numbers.is_empty() {
            String::new()
        } else {
            document
                .extract_text(&page_numbers)
                .map_err(|error| format!("failed extracting text from pdf '{name}': {error}"))?
        };

        Ok(Self {
            name: name.to_owned(),
            page_count: page_numbers.len(),
            text,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Build a PDF whose pages each hold one text object per line.
#[cfg(test)]
pub(crate) fn render_test_pdf(pages: &[&[&str]]) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};

    let mut document = lopdf::Document::with_version("1.5");
    let pages_id = document.new_object_id();
    let font_id = document.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = document.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (row, line) in lines.iter().enumerate() {
            let y = 760 - (row as i64) * 14;
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 10.into()]));
            operations.push(Operation::new("Td", vec![40.into(), y.into()]));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(line.to_string())],
            ));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = document.add_object(Stream::new(
            lopdf::Dictionary::new(),
            content.encode().expect("encode page content"),
        ));
        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    document.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    document.save_to(&mut bytes).expect("serialize test pdf");
    bytes
}
