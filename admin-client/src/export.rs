//! CSV export of whatever is currently loaded on a page.

use crate::models::{Report, User};

pub const REGISTRATIONS_FILE: &str = "registrations.csv";
pub const REPORTS_FILE: &str = "reports.csv";
pub const CSV_MIME: &str = "text/csv;charset=utf-8;";

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn to_csv(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(headers.join(","));
    lines.extend(rows.into_iter().map(|row| row.join(",")));
    lines.join("\n")
}

pub fn registrations_csv(users: &[User]) -> String {
    let rows = users
        .iter()
        .map(|user| {
            vec![
                quoted(&user.name),
                user.email.clone(),
                user.phone.clone(),
                quoted(&user.location),
                user.package.to_string(),
                user.status.to_string(),
                user.created_at
                    .map(|at| at.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ]
        })
        .collect();

    to_csv(
        &["Name", "Email", "Phone", "Location", "Package", "Status", "Joined"],
        rows,
    )
}

pub fn reports_csv(reports: &[Report]) -> String {
    let rows = reports
        .iter()
        .map(|report| {
            let (name, email) = if report.is_anonymous {
                ("Anonymous".to_string(), "N/A".to_string())
            } else {
                (
                    report.contact_name().unwrap_or("Unknown").to_string(),
                    report.contact_email().unwrap_or("N/A").to_string(),
                )
            };
            vec![
                if report.id.is_empty() {
                    "N/A".to_string()
                } else {
                    report.id.clone()
                },
                name,
                email,
                quoted(&report.message),
                (if report.is_anonymous { "Yes" } else { "No" }).to_string(),
                report.status.clone().unwrap_or_else(|| "Unknown".to_string()),
                report
                    .created_at
                    .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_default(),
            ]
        })
        .collect();

    to_csv(
        &["ID", "Name", "Email", "Message", "Anonymous", "Status", "Created At"],
        rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Package, UserStatus};
    use chrono::{TimeZone, Utc};

    #[test]
    fn registrations_quote_free_text() {
        let user = User {
            id: "u1".into(),
            name: "Ada \"The Countess\" Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "555".into(),
            location: "London, UK".into(),
            package: Package::Premium,
            status: UserStatus::Active,
            total_spent: 0.0,
            created_at: Some(Utc.with_ymd_and_hms(2026, 3, 4, 0, 0, 0).unwrap()),
        };

        let csv = registrations_csv(&[user]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Name,Email,Phone,Location,Package,Status,Joined");
        assert_eq!(
            lines[1],
            r#""Ada ""The Countess"" Lovelace",ada@example.com,555,"London, UK",Premium,active,2026-03-04"#
        );
    }

    #[test]
    fn anonymous_reports_hide_contact() {
        let report = Report {
            id: "r1".into(),
            message: "line".into(),
            is_anonymous: true,
            name: Some("Secret".into()),
            email: Some("secret@example.com".into()),
            status: None,
            is_read: false,
            created_at: None,
        };
        let csv = reports_csv(&[report]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, r#"r1,Anonymous,N/A,"line",Yes,Unknown,"#);
        assert!(!csv.contains("Secret"));
    }

    #[test]
    fn empty_export_is_header_only() {
        assert_eq!(reports_csv(&[]), "ID,Name,Email,Message,Anonymous,Status,Created At");
    }
}
