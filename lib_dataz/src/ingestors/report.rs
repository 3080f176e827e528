//! Human-readable summary of what a poller collected.

use crate::feeds::ItemRecord;
use crate::jobs::JobConfig;

const RULE: &str = "--------------------------------";

/// Renders the report handed to the printer once a poller finishes:
///
/// ```text
/// received 16 items
/// data type: random-letters
/// --------------------------------
/// 2026-10-17T09:12:01+00:00: Q
/// ...
/// --------------------------------
/// ```
pub fn format_report(config: &JobConfig, items: &[ItemRecord]) -> String {
    let mut lines = vec![
        format!("received {} items", items.len()),
        format!("data type: {}", config.d_type),
        RULE.to_string(),
    ];
    lines.extend(items.iter().map(|item| {
        let at = item
            .created_at()
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| item.ts.to_string());
        format!("{}: {}", at, config.d_type.render(&item.data))
    }));
    lines.push(RULE.to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::GenerationMode;

    #[test]
    fn report_lists_every_item() {
        let config = JobConfig {
            name: "/configs/456".to_string(),
            dataz: "http://localhost:8081".to_string(),
            stream: "/streams/medium".to_string(),
            d_type: GenerationMode::RandomLetters,
        };
        let items = vec![
            ItemRecord {
                name: "/streams/medium/items/1".to_string(),
                n: 1,
                ts: 0,
                data: b"Q".to_vec(),
            },
            ItemRecord {
                name: "/streams/medium/items/2".to_string(),
                n: 2,
                ts: 1000,
                data: b"Z".to_vec(),
            },
        ];

        let report = format_report(&config, &items);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "received 2 items");
        assert_eq!(lines[1], "data type: random-letters");
        assert_eq!(lines[2], RULE);
        assert_eq!(lines[3], "1970-01-01T00:00:00+00:00: Q");
        assert_eq!(lines[4], "1970-01-01T00:00:01+00:00: Z");
        assert_eq!(lines[5], RULE);
        assert_eq!(lines.len(), 6);
        assert!(report.ends_with(&format!("{}\n", RULE)));

        let empty = format_report(&config, &[]);
        assert_eq!(empty, format!("received 0 items\ndata type: random-letters\n{}\n{}\n", RULE, RULE));
    }
}
