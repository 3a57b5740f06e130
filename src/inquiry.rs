//! Form intake and validation for wedding inquiries.
//!
//! A submission is accepted only when every required field is non-empty after
//! sanitization. Rejections happen here, before any external call is made.

use serde::Deserialize;
use thiserror::Error;

/// Sentinel shown in the notification when no event type was selected.
pub const EVENTS_NONE_SELECTED: &str = "None selected";

/// Raw form payload as parsed from the request body.
///
/// Every key is optional at the transport layer; a missing key is treated as
/// an empty value. The `events` field may arrive multi-valued (checkbox
/// group), and some form builders submit it under the `events[]` name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawInquiry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, alias = "events[]")]
    pub events: Vec<String>,
}

/// A sanitized, policy-complete inquiry, valid for exactly one
/// validate-then-dispatch traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InquiryRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: String,
    pub location: String,
    /// Comma-joined event labels, or [`EVENTS_NONE_SELECTED`].
    pub events: String,
}

/// One or more required fields were empty or absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required field(s): {}", missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

/// Escape characters significant to HTML markup.
///
/// Applied exactly once per field at intake. Escaping an already-escaped
/// value escapes the ampersands again; callers must not re-apply it.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Sanitize a raw submission and enforce required-field policy.
///
/// `name`, `email`, `phone` and `date` must be non-empty after sanitization;
/// `location` may be empty and an empty `events` set becomes the sentinel.
/// On failure the error names every missing field and nothing is dispatched.
pub fn accept_submission(raw: RawInquiry) -> Result<InquiryRecord, ValidationError> {
    let events = if raw.events.is_empty() {
        EVENTS_NONE_SELECTED.to_string()
    } else {
        raw.events
            .iter()
            .map(|label| escape_html(label))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let record = InquiryRecord {
        name: escape_html(&raw.name),
        email: escape_html(&raw.email),
        phone: escape_html(&raw.phone),
        date: escape_html(&raw.date),
        location: escape_html(&raw.location),
        events,
    };

    let mut missing = Vec::new();
    if record.name.is_empty() {
        missing.push("name");
    }
    if record.email.is_empty() {
        missing.push("email");
    }
    if record.phone.is_empty() {
        missing.push("phone");
    }
    if record.date.is_empty() {
        missing.push("date");
    }

    if missing.is_empty() {
        Ok(record)
    } else {
        Err(ValidationError { missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_raw() -> RawInquiry {
        RawInquiry {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "+91-90000".to_string(),
            date: "2026-02-14".to_string(),
            location: "Jaipur".to_string(),
            events: vec!["Engagement".to_string(), "Sangeet".to_string()],
        }
    }

    #[test]
    fn accepts_complete_submission() {
        let record = accept_submission(full_raw()).unwrap();
        assert_eq!(record.name, "Asha Rao");
        assert_eq!(record.events, "Engagement, Sangeet");
    }

    #[test]
    fn accepts_empty_optional_fields() {
        let raw = RawInquiry {
            location: String::new(),
            events: Vec::new(),
            ..full_raw()
        };

        let record = accept_submission(raw).unwrap();
        assert_eq!(record.location, "");
        assert_eq!(record.events, EVENTS_NONE_SELECTED);
    }

    #[test]
    fn rejects_each_missing_required_field() {
        for field in ["name", "email", "phone", "date"] {
            let mut raw = full_raw();
            match field {
                "name" => raw.name.clear(),
                "email" => raw.email.clear(),
                "phone" => raw.phone.clear(),
                _ => raw.date.clear(),
            }

            let err = accept_submission(raw).unwrap_err();
            assert_eq!(err.missing, vec![field]);
        }
    }

    #[test]
    fn rejection_names_all_missing_fields() {
        let err = accept_submission(RawInquiry::default()).unwrap_err();
        assert_eq!(err.missing, vec!["name", "email", "phone", "date"]);
        assert_eq!(
            err.to_string(),
            "missing required field(s): name, email, phone, date"
        );
    }

    #[test]
    fn sanitizes_markup_in_every_field() {
        let raw = RawInquiry {
            name: "<b>Asha</b>".to_string(),
            location: "Jaipur & Udaipur".to_string(),
            events: vec!["\"Reception\"".to_string()],
            ..full_raw()
        };

        let record = accept_submission(raw).unwrap();
        assert_eq!(record.name, "&lt;b&gt;Asha&lt;/b&gt;");
        assert_eq!(record.location, "Jaipur &amp; Udaipur");
        assert_eq!(record.events, "&quot;Reception&quot;");
    }

    #[test]
    fn escape_is_not_idempotent() {
        // Escaping is applied once at intake. Applying it to an
        // already-escaped value escapes the ampersands again.
        let once = escape_html("fish & chips");
        assert_eq!(once, "fish &amp; chips");
        assert_eq!(escape_html(&once), "fish &amp;amp; chips");
    }

    #[test]
    fn events_join_uses_comma_space() {
        let raw = RawInquiry {
            events: vec!["Engagement".to_string(), "Reception".to_string()],
            ..full_raw()
        };
        assert_eq!(
            accept_submission(raw).unwrap().events,
            "Engagement, Reception"
        );
    }
}
