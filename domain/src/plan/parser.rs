//! Recommendation parsing from collaborator payloads.
//!
//! Collaborators answer with JSON, sometimes wrapped in a ` ```json ` fence,
//! sometimes as `{"recommendations": [...]}`, sometimes truncated mid-way.
//! Parsing gets exactly one repair attempt: cut the array back to its last
//! complete element and close it.

use super::recommendation::Recommendation;
use crate::core::error::DomainError;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    List(Vec<Recommendation>),
    Wrapped { recommendations: Vec<Recommendation> },
}

impl Payload {
    fn into_list(self) -> Vec<Recommendation> {
        match self {
            Payload::List(list) => list,
            Payload::Wrapped { recommendations } => recommendations,
        }
    }
}

/// Parse a collaborator payload into an ordered recommendation list.
///
/// On failure a single repair is attempted with [`repair_truncated`]; if the
/// repaired text still does not parse the error is returned.
pub fn parse_recommendations(raw: &str) -> Result<Vec<Recommendation>, DomainError> {
    let body = strip_code_fence(raw);

    let first_error = match serde_json::from_str::<Payload>(body) {
        Ok(payload) => return Ok(payload.into_list()),
        Err(e) => e,
    };

    let Some(repaired) = repair_truncated(body) else {
        return Err(DomainError::MalformedRecommendations(first_error.to_string()));
    };

    serde_json::from_str::<Vec<Recommendation>>(&repaired).map_err(|e| {
        DomainError::MalformedRecommendations(format!(
            "{} (after repair: {})",
            first_error, e
        ))
    })
}

/// Extract the body of a ` ```json ` / ` ``` ` fenced block, if any.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the info string ("json") on the opening line
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    rest.rsplit_once("```")
        .map(|(body, _)| body)
        .unwrap_or(rest)
        .trim()
}

/// Cut the first JSON array in `body` back to its last well-formed boundary.
///
/// - Array closed but followed by junk: the array slice itself.
/// - Array truncated: everything up to the last complete top-level element,
///   with `]` appended.
///
/// Returns `None` when no array or no complete element exists.
pub fn repair_truncated(body: &str) -> Option<String> {
    let start = body.find('[')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut last_complete = None;

    for (offset, ch) in body[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '[' | '{' => depth += 1,
            ']' | '}' => {
                depth = depth.saturating_sub(1);
                let end = start + offset + ch.len_utf8();
                if depth == 0 {
                    return Some(body[start..end].to_string());
                }
                if depth == 1 {
                    last_complete = Some(end);
                }
            }
            _ => {}
        }
    }

    last_complete.map(|end| format!("{}]", &body[start..end]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_array() {
        let raw = r#"[{"name":"Riverside Park","estimated_cost_per_person":0},{"name":"Museum"}]"#;
        let list = parse_recommendations(raw).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].name, "Riverside Park");
    }

    #[test]
    fn test_parse_wrapped_object() {
        let raw = r#"{"recommendations":[{"name":"Taco Stand","best":true}]}"#;
        let list = parse_recommendations(raw).unwrap();
        assert!(list[0].best);
    }

    #[test]
    fn test_parse_fenced_block() {
        let raw = "```json\n[{\"name\":\"Ferry\"}]\n```";
        let list = parse_recommendations(raw).unwrap();
        assert_eq!(list[0].name, "Ferry");
    }

    #[test]
    fn test_repair_truncated_array() {
        let raw = r#"[{"name":"A","estimated_cost_per_person":5},{"name":"B"},{"name":"C","note":"cut of"#;
        let list = parse_recommendations(raw).unwrap();
        let names: Vec<&str> = list.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_repair_ignores_brackets_inside_strings() {
        let raw = r#"[{"name":"Bar [closed] {soon}"},{"name":"Caf"#;
        let list = parse_recommendations(raw).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "Bar [closed] {soon}");
    }

    #[test]
    fn test_repair_trailing_junk() {
        let raw = r#"Here you go: [{"name":"Zoo"}] hope that helps!"#;
        let list = parse_recommendations(raw).unwrap();
        assert_eq!(list[0].name, "Zoo");
    }

    #[test]
    fn test_unrepairable_payload_fails() {
        let err = parse_recommendations("sorry, I cannot help with that").unwrap_err();
        assert!(err.is_malformed_payload());

        let err = parse_recommendations(r#"[{"name":"trunc"#).unwrap_err();
        assert!(err.is_malformed_payload());
    }

    #[test]
    fn test_repair_only_once() {
        // Repaired text is structurally valid but semantically wrong (no name)
        let raw = r#"[{"title":"no name field"},{"title":"x"#;
        assert!(parse_recommendations(raw).is_err());
    }
}
