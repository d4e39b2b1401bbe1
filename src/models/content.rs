//! Records a slide can point at, as shown in the slide editor's picker.

use serde::{Deserialize, Serialize};

use super::ReferenceKind;

/// One selectable entry in the reference picker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContentOption {
    pub id: String,
    pub title: String,
}

/// Query for `GET /api/content/options`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentOptionsQuery {
    pub kind: ReferenceKind,
}

/// Picker label for an announcement; the type distinguishes events from
/// plain notices.
pub fn announcement_label(title: &str, announcement_type: &str) -> String {
    let kind = if announcement_type == "event" {
        "Evento"
    } else {
        "Aviso"
    };
    format!("{} ({})", title, kind)
}

/// Picker label for a recurring celebration.
pub fn celebration_label(
    community_name: &str,
    celebration_type: &str,
    day_of_week: &str,
    time: &str,
) -> String {
    format!(
        "{} - {} ({} {})",
        community_name, celebration_type, day_of_week, time
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_announcement_label() {
        assert_eq!(announcement_label("Quermesse", "event"), "Quermesse (Evento)");
        assert_eq!(announcement_label("Secretaria fechada", "notice"), "Secretaria fechada (Aviso)");
    }

    #[test]
    fn test_celebration_label() {
        assert_eq!(
            celebration_label("Matriz", "Missa", "Domingo", "08:00"),
            "Matriz - Missa (Domingo 08:00)"
        );
    }
}
