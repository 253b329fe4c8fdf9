use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;

/// Team names and scores read from the `Match Report` header.
///
/// The four values are captured together or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreLine {
    Present {
        my_team: String,
        vs_team: String,
        my_score: u32,
        vs_score: u32,
    },
    Absent,
}

impl ScoreLine {
    pub fn my_team(&self) -> Option<&str> {
        match self {
            ScoreLine::Present { my_team, .. } => Some(my_team),
            ScoreLine::Absent => None,
        }
    }

    pub fn vs_team(&self) -> Option<&str> {
        match self {
            ScoreLine::Present { vs_team, .. } => Some(vs_team),
            ScoreLine::Absent => None,
        }
    }

    pub fn scores(&self) -> Option<(u32, u32)> {
        match self {
            ScoreLine::Present {
                my_score, vs_score, ..
            } => Some((*my_score, *vs_score)),
            ScoreLine::Absent => None,
        }
    }

    /// Display form `"A - B"`, or `"None - None"` when the group is absent.
    pub fn score_display(&self) -> String {
        match self.scores() {
            Some((my_score, vs_score)) => format!("{my_score} - {vs_score}"),
            None => "None - None".to_owned(),
        }
    }
}

/// Player line and free-text position following the work-rate block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerLine {
    pub name: String,
    pub position: Option<String>,
}

/// Every field the rule table pulls out of one report.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFields {
    pub score_line: ScoreLine,
    pub date: Option<String>,
    pub playing_time_minutes: Option<u32>,
    pub ball_possessions: Option<u32>,
    pub one_touch: Option<u32>,
    pub short_possessions: Option<u32>,
    pub long_possessions: Option<u32>,
    pub total_releases: Option<u32>,
    pub accl_decl_count: Option<u32>,
    pub distance_covered_km: Option<f64>,
    pub sprint_distance_m: Option<f64>,
    pub work_rate_m_per_min: Option<f64>,
    pub player: Option<PlayerLine>,
}

impl ExtractedFields {
    /// Run every rule against `text`. Rules are independent of each other.
    pub fn extract(text: &str) -> Self {
        Self {
            score_line: score_line(text),
            date: date(text),
            playing_time_minutes: playing_time_minutes(text),
            ball_possessions: ball_possessions(text),
            one_touch: one_touch(text),
            short_possessions: short_possessions(text),
            long_possessions: long_possessions(text),
            total_releases: total_releases(text),
            accl_decl_count: accl_decl_count(text),
            distance_covered_km: distance_covered_km(text),
            sprint_distance_m: sprint_distance_m(text),
            work_rate_m_per_min: work_rate_m_per_min(text),
            player: player_line(text),
        }
    }

    pub fn player_name(&self) -> Option<&str> {
        self.player.as_ref().map(|player| player.name.as_str())
    }

    pub fn position(&self) -> Option<&str> {
        self.player
            .as_ref()
            .and_then(|player| player.position.as_deref())
    }
}

macro_rules! rule_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static Regex {
            static REGEX: OnceLock<Regex> = OnceLock::new();
            REGEX.get_or_init(|| Regex::new($pattern).expect("rule regex compiles"))
        }
    };
}

// Digits are ASCII only; other numeral systems never parse as numbers.
rule_regex!(
    score_line_regex,
    r"(?s)Match\s*Report\s*(.*?)\s*([0-9]+)\s*:\s*([0-9]+)\s*(.*?)\s*Technical Summary"
);
rule_regex!(date_regex, r"DATE\s*(\w+\s*[0-9]+)");
rule_regex!(playing_time_regex, r"PLAYING\s*TIME\s*([0-9]+)\s*Min");
rule_regex!(ball_possessions_regex, r"([0-9]+)\s*Ball Possessions \(#\)");
rule_regex!(one_touch_regex, r"([0-9]+)\s*One-Touch \(#\)");
rule_regex!(short_possessions_regex, r"([0-9]+)\s*Short Possessions \(#\)");
rule_regex!(long_possessions_regex, r"([0-9]+)\s*Long Possessions \(#\)");
rule_regex!(total_releases_regex, r"([0-9]+)\s*Total Releases \(#\)");
rule_regex!(accl_decl_regex, r"([0-9]+)\s*Accl/Decl \(#\)");
rule_regex!(distance_covered_regex, r"([0-9]+\.[0-9]+)\s*Distance Covered \(km\)");
rule_regex!(sprint_distance_regex, r"([0-9]+\.[0-9]+)\s*Sprint Distance \(m\)");
rule_regex!(work_rate_regex, r"([0-9]+\.[0-9]+)\s*Work Rate \(m/min\)");
rule_regex!(
    player_line_regex,
    r"(?s)Work Rate \(m/min\) \n([0-9.]+|N/A)\n([^\n]+)\n(.*?)\nDATE"
);

/// Team names and score between `Match Report` and `Technical Summary`.
pub fn score_line(text: &str) -> ScoreLine {
    let Some(captures) = score_line_regex().captures(text) else {
        return ScoreLine::Absent;
    };

    let (Some(my_score), Some(vs_score)) = (
        parse_number::<u32>(&captures[2]),
        parse_number::<u32>(&captures[3]),
    ) else {
        return ScoreLine::Absent;
    };

    ScoreLine::Present {
        my_team: captures[1].trim().to_owned(),
        vs_team: captures[4].trim().to_owned(),
        my_score,
        vs_score,
    }
}

/// Month and day token after the first `DATE` marker, e.g. `Mar 14`.
pub fn date(text: &str) -> Option<String> {
    date_regex()
        .captures(text)
        .map(|captures| captures[1].to_owned())
}

pub fn playing_time_minutes(text: &str) -> Option<u32> {
    first_number(playing_time_regex(), text)
}

pub fn ball_possessions(text: &str) -> Option<u32> {
    first_number(ball_possessions_regex(), text)
}

pub fn one_touch(text: &str) -> Option<u32> {
    first_number(one_touch_regex(), text)
}

pub fn short_possessions(text: &str) -> Option<u32> {
    first_number(short_possessions_regex(), text)
}

pub fn long_possessions(text: &str) -> Option<u32> {
    first_number(long_possessions_regex(), text)
}

pub fn total_releases(text: &str) -> Option<u32> {
    first_number(total_releases_regex(), text)
}

pub fn accl_decl_count(text: &str) -> Option<u32> {
    first_number(accl_decl_regex(), text)
}

pub fn distance_covered_km(text: &str) -> Option<f64> {
    first_number(distance_covered_regex(), text)
}

pub fn sprint_distance_m(text: &str) -> Option<f64> {
    first_number(sprint_distance_regex(), text)
}

pub fn work_rate_m_per_min(text: &str) -> Option<f64> {
    first_number(work_rate_regex(), text)
}

/// Player name and position following the `Work Rate (m/min)` block.
///
/// Layout after the anchor: a work-rate value (or `N/A`) line, the player
/// name line, then position lines up to the next `DATE` line. Position keeps
/// its line breaks. A blank name line counts as no player.
pub fn player_line(text: &str) -> Option<PlayerLine> {
    let captures = player_line_regex().captures(text)?;
    let name = captures[2].trim();
    if name.is_empty() {
        return None;
    }
    let position = captures[3].trim();

    Some(PlayerLine {
        name: name.to_owned(),
        position: (!position.is_empty()).then(|| position.to_owned()),
    })
}

fn first_number<T: FromStr>(regex: &Regex, text: &str) -> Option<T> {
    regex
        .captures(text)
        .and_then(|captures| parse_number(&captures[1]))
}

// Digit runs longer than the target type can hold read as absent.
fn parse_number<T: FromStr>(raw: &str) -> Option<T> {
    raw.parse().ok()
}
