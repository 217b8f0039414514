//! Terminal table rendering

use crate::records::EnrichedUserRecord;

const HEADERS: [&str; 5] = ["user_id", "name", "email", "city", "posts_count"];

/// Render records as a left-aligned, space-padded table.
pub fn render_table(records: &[EnrichedUserRecord]) -> String {
    let rows: Vec<[String; 5]> = records
        .iter()
        .map(|r| {
            [
                r.user_id.to_string(),
                r.name.clone(),
                r.email.clone(),
                r.city.clone(),
                r.posts_count.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, HEADERS.iter().copied(), &widths);
    for row in &rows {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table_aligns_columns() {
        let records = vec![
            EnrichedUserRecord {
                user_id: 10,
                name: "Clementina DuBuque".to_string(),
                email: "Rey.Padberg@karina.biz".to_string(),
                city: "Lebsackbury".to_string(),
                posts_count: 10,
            },
            EnrichedUserRecord {
                user_id: 2,
                name: "Ervin".to_string(),
                email: "e@x.com".to_string(),
                city: "W".to_string(),
                posts_count: 3,
            },
        ];

        let table = render_table(&records);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("user_id  name"));
        assert!(lines[1].starts_with("10"));
        assert_eq!(lines[0].find("name"), lines[1].find("Clementina"));
        assert_eq!(lines[0].find("email"), lines[1].find("Rey"));
        assert!(lines[2].ends_with("3"));
        assert_eq!(lines[1].find("Rey"), lines[2].find("e@x.com"));
    }

    #[test]
    fn test_render_empty_table_has_header_only() {
        assert_eq!(render_table(&[]), "user_id  name  email  city  posts_count\n");
    }
}
