use super::{clean_line, ChatParser, MessageRecord};
use crate::error::AnalysisResult;
use chrono::NaiveDateTime;
use matchday_core::title_case;
use regex::Regex;
use tracing::{debug, warn};

/// Timestamp layouts in the order they are tried. Month-first layouts carry
/// a meridiem marker, day-first layouts use a 24-hour clock.
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%m/%d/%y, %I:%M:%S %p",
    "%d/%m/%y, %H:%M:%S",
    "%m/%d/%Y, %I:%M:%S %p",
    "%d/%m/%Y, %H:%M:%S",
];

/// Parser for WhatsApp transcript exports.
///
/// Reads lines shaped like `[13/10/25, 15:45:23] Ali: Geliyorum` with an
/// optional `AM`/`PM` after the time.
#[derive(Debug, Clone)]
pub struct WhatsAppParser {
    line_pattern: Regex,
    phone_pattern: Regex,
    whitespace_pattern: Regex,
}

impl WhatsAppParser {
    /// Creates a new WhatsAppParser instance.
    pub fn new() -> AnalysisResult<Self> {
        Ok(Self {
            line_pattern: Regex::new(
                r"^\[(\d{1,2}/\d{1,2}/\d{2,4}),\s+(\d{1,2}:\d{2}:\d{2})(?:\s+(AM|PM))?\]\s+([^:]+):\s+(.*)$",
            )?,
            phone_pattern: Regex::new(r"\+\d+")?,
            whitespace_pattern: Regex::new(r"\s+")?,
        })
    }

    /// Normalise a sender as exported: phone numbers and the `~` marker for
    /// non-contacts are dropped, whitespace collapsed, the rest title-cased.
    pub fn clean_sender(&self, raw: &str) -> String {
        let name = self.phone_pattern.replace_all(raw, "");
        let name = self.whitespace_pattern.replace_all(&name, " ");
        let name = name.trim();
        let name = name.strip_prefix('~').unwrap_or(name).trim();
        title_case(name)
    }

    fn parse_line(&self, line: &str, fallback: NaiveDateTime) -> Option<MessageRecord> {
        let caps = self.line_pattern.captures(line)?;

        let mut stamp = format!("{}, {}", caps.get(1)?.as_str(), caps.get(2)?.as_str());
        if let Some(meridiem) = caps.get(3) {
            stamp.push(' ');
            stamp.push_str(meridiem.as_str());
        }

        let timestamp = parse_timestamp(&stamp).unwrap_or_else(|| {
            warn!("unreadable timestamp '{}', using processing time", stamp);
            fallback
        });

        Some(MessageRecord {
            timestamp,
            sender: self.clean_sender(caps.get(4)?.as_str()),
            message: caps.get(5)?.as_str().trim().to_string(),
            original_line: line.to_string(),
        })
    }
}

impl ChatParser for WhatsAppParser {
    fn name(&self) -> &str {
        "whatsapp"
    }

    fn matches_line(&self, line: &str) -> bool {
        self.line_pattern.is_match(line)
    }

    fn parse_at(&self, text: &str, fallback: NaiveDateTime) -> Vec<MessageRecord> {
        let mut records = Vec::new();

        for line in text.lines() {
            let line = clean_line(line);
            if line.is_empty() {
                continue;
            }

            match self.parse_line(line, fallback) {
                Some(record) => records.push(record),
                None => debug!("skipping non-message line: {}", line),
            }
        }

        records
    }
}

/// Try each layout in [`TIMESTAMP_FORMATS`]; the first that parses wins.
fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parser() -> WhatsAppParser {
        WhatsAppParser::new().expect("parser")
    }

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, s))
            .expect("valid datetime")
    }

    #[test]
    fn parses_day_first_line() {
        let records = parser().parse("[13/10/25, 15:45:23] Ali: Geliyorum yarın");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sender, "Ali");
        assert_eq!(records[0].message, "Geliyorum yarın");
        assert_eq!(records[0].timestamp, dt(2025, 10, 13, 15, 45, 23));
        assert_eq!(records[0].original_line, "[13/10/25, 15:45:23] Ali: Geliyorum yarın");
    }

    #[test]
    fn meridiem_selects_month_first_layout() {
        let records = parser().parse("[1/2/25, 3:04:05 PM] Veli: tamam");
        assert_eq!(records[0].timestamp, dt(2025, 1, 2, 15, 4, 5));

        let records = parser().parse("[1/2/25, 3:04:05] Veli: tamam");
        assert_eq!(records[0].timestamp, dt(2025, 2, 1, 3, 4, 5));
    }

    #[test]
    fn four_digit_years() {
        let records = parser().parse(
            "[13/10/2025, 15:45:23] Ali: evet\n[10/13/2025, 9:00:00 AM] Veli: hayır",
        );
        assert_eq!(records[0].timestamp, dt(2025, 10, 13, 15, 45, 23));
        assert_eq!(records[1].timestamp, dt(2025, 10, 13, 9, 0, 0));
    }

    #[test]
    fn unreadable_timestamp_falls_back() {
        let fallback = dt(2030, 1, 1, 0, 0, 0);
        let records = parser().parse_at("[31/31/25, 10:00:00] Ali: evet", fallback);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].timestamp, fallback);
    }

    #[test]
    fn skips_system_and_blank_lines() {
        let text = "\n\
            Messages and calls are end-to-end encrypted.\n\
            [13/10/25, 15:45:23] Ali: geliyorum\n\
            \n\
            devam eden satır\n\
            [13/10/25, 15:46:00] Veli: gelemem\n";
        let records = parser().parse(text);
        let senders: Vec<&str> = records.iter().map(|r| r.sender.as_str()).collect();
        assert_eq!(senders, vec!["Ali", "Veli"]);
    }

    #[test]
    fn message_keeps_later_colons() {
        let records = parser().parse("[13/10/25, 15:45:23] Ali: saat 20:00 mı?");
        assert_eq!(records[0].sender, "Ali");
        assert_eq!(records[0].message, "saat 20:00 mı?");
    }

    #[test]
    fn sender_cleanup() {
        let p = parser();
        assert_eq!(p.clean_sender("~ mehmet   yılmaz"), "Mehmet Yılmaz");
        assert_eq!(p.clean_sender("+905551234567 ahmet"), "Ahmet");
        assert_eq!(p.clean_sender("~\u{202f}Can"), "Can");
        assert_eq!(p.clean_sender("AYŞE"), "Ayşe");
    }

    #[test]
    fn leading_direction_mark_is_ignored() {
        let records = parser().parse("\u{200e}[13/10/25, 15:45:23] Ali: evet");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].original_line, "[13/10/25, 15:45:23] Ali: evet");
    }
}
