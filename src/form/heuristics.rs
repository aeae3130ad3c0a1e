use crate::browser::page::FieldAttributes;
use crate::form::answers;
use serde::{Deserialize, Serialize};

/// Semantic role of a form control, independent of its HTML attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldRole {
    FullName,
    Email,
    Phone,
    ResumeFile,
    FreeTextQuestion,
}

impl FieldRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldRole::FullName => "full-name",
            FieldRole::Email => "email",
            FieldRole::Phone => "phone",
            FieldRole::ResumeFile => "resume-file",
            FieldRole::FreeTextQuestion => "free-text-question",
        }
    }
}

impl std::fmt::Display for FieldRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input types that never carry one of our roles
const IGNORED_TYPES: &[&str] = &[
    "hidden", "submit", "button", "reset", "image", "checkbox", "radio", "password", "date", "number", "range",
    "color", "search",
];

const EMAIL_HINTS: &[&str] = &["email", "e-mail"];
const PHONE_HINTS: &[&str] = &["phone", "mobile", "telephone"];
const FULL_NAME_HINTS: &[&str] = &["full name", "fullname", "full_name", "full-name", "your name", "legal name"];

/// Tokens that turn a bare "name" into some other kind of name
const NAME_QUALIFIERS: &[&str] = &[
    "first", "last", "middle", "given", "family", "sur", "company", "user", "employer", "school", "file", "nick",
    "preferred", "reference", "manager", "organization", "organisation", "university",
];

/// Map a control's attributes to a role.
///
/// Priority: explicit input `type` (email, tel, file) outranks substring matches over
/// name/id/placeholder/label, which are tried in the order email, phone, full name, and
/// finally free-text question.
pub fn detect_role(attrs: &FieldAttributes) -> Option<FieldRole> {
    let tag = attrs.tag.to_ascii_lowercase();
    let input_type = attrs.input_type.to_ascii_lowercase();

    if tag == "select" {
        return None;
    }

    match input_type.as_str() {
        "email" => return Some(FieldRole::Email),
        "tel" => return Some(FieldRole::Phone),
        "file" => return Some(FieldRole::ResumeFile),
        t if IGNORED_TYPES.contains(&t) => return None,
        _ => {}
    }

    let haystack = haystack(attrs);

    if contains_any(&haystack, EMAIL_HINTS) {
        return Some(FieldRole::Email);
    }
    if contains_any(&haystack, PHONE_HINTS) {
        return Some(FieldRole::Phone);
    }
    if is_full_name(&haystack) {
        return Some(FieldRole::FullName);
    }

    if tag == "textarea" {
        return Some(FieldRole::FreeTextQuestion);
    }

    // Single-line inputs only count as questions when their label reads like one
    let question = question_text(attrs);
    if question.contains('?') || answers::topic_of(question).is_some() {
        return Some(FieldRole::FreeTextQuestion);
    }

    None
}

/// The most descriptive text available for a question field: label, then placeholder, then name
pub fn question_text(attrs: &FieldAttributes) -> &str {
    [&attrs.label, &attrs.placeholder, &attrs.name]
        .into_iter()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .unwrap_or("")
}

fn haystack(attrs: &FieldAttributes) -> String {
    [&attrs.name, &attrs.id, &attrs.placeholder, &attrs.label]
        .iter()
        .map(|s| s.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

fn is_full_name(haystack: &str) -> bool {
    if contains_any(haystack, FULL_NAME_HINTS) {
        return true;
    }

    let tokens: Vec<&str> = haystack.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty()).collect();

    tokens.contains(&"name") && !tokens.iter().any(|t| NAME_QUALIFIERS.iter().any(|q| t.starts_with(q)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(tag: &str, input_type: &str, name: &str, label: &str) -> FieldAttributes {
        FieldAttributes {
            tag: tag.into(),
            input_type: input_type.into(),
            name: name.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_explicit_type_wins() {
        // type=email outranks a name-ish name attribute
        assert_eq!(detect_role(&attrs("input", "email", "full_name", "Name")), Some(FieldRole::Email));
        assert_eq!(detect_role(&attrs("input", "tel", "email_or_phone", "")), Some(FieldRole::Phone));
        assert_eq!(detect_role(&attrs("input", "file", "cover", "Cover letter")), Some(FieldRole::ResumeFile));
    }

    #[test]
    fn test_substring_matching_is_case_insensitive() {
        assert_eq!(detect_role(&attrs("input", "text", "", "E-Mail Address")), Some(FieldRole::Email));
        assert_eq!(detect_role(&attrs("input", "", "MobileNumber", "")), Some(FieldRole::Phone));
        assert_eq!(detect_role(&attrs("input", "text", "applicant[name]", "")), Some(FieldRole::FullName));
        assert_eq!(detect_role(&attrs("input", "text", "", "Full Name *")), Some(FieldRole::FullName));
    }

    #[test]
    fn test_email_substring_beats_name() {
        assert_eq!(detect_role(&attrs("input", "text", "name_email", "")), Some(FieldRole::Email));
    }

    #[test]
    fn test_qualified_names_are_not_full_name() {
        assert_eq!(detect_role(&attrs("input", "text", "first_name", "First name")), None);
        assert_eq!(detect_role(&attrs("input", "text", "lastName", "")), None);
        assert_eq!(detect_role(&attrs("input", "text", "company_name", "Company name")), None);
        assert_eq!(detect_role(&attrs("input", "text", "username", "")), None);
    }

    #[test]
    fn test_free_text_questions() {
        assert_eq!(detect_role(&attrs("textarea", "", "q_123", "")), Some(FieldRole::FreeTextQuestion));
        assert_eq!(
            detect_role(&attrs("input", "text", "q1", "What are your salary expectations")),
            Some(FieldRole::FreeTextQuestion)
        );
        assert_eq!(
            detect_role(&attrs("input", "text", "q2", "Do you require sponsorship?")),
            Some(FieldRole::FreeTextQuestion)
        );
        assert_eq!(detect_role(&attrs("input", "text", "city", "City")), None);
    }

    #[test]
    fn test_ignored_controls() {
        assert_eq!(detect_role(&attrs("input", "hidden", "email", "")), None);
        assert_eq!(detect_role(&attrs("input", "checkbox", "phone_opt_in", "")), None);
        assert_eq!(detect_role(&attrs("select", "", "country_phone_code", "")), None);
    }

    #[test]
    fn test_question_text_prefers_label() {
        let mut field = attrs("textarea", "", "q_7", "");
        field.placeholder = "Tell us about your experience".into();
        assert_eq!(question_text(&field), "Tell us about your experience");
        field.label = "Background".into();
        assert_eq!(question_text(&field), "Background");
    }
}
