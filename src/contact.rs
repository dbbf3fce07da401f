use serde::Deserialize;
use url::form_urlencoded;

pub const FIELD_COMPANY: &str = "company";
pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PHONE: &str = "phone";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_MESSAGE: &str = "message";
pub const FIELD_PRIVACY: &str = "privacy";

/// Value browsers post for a checked checkbox without an explicit `value`.
const CHECKBOX_ON: &str = "on";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Category {
    Subsidy,
    PublicTender,
    AiServices,
    Other,
}

impl Category {
    pub const ALL: [Self; 4] = [Self::Subsidy, Self::PublicTender, Self::AiServices, Self::Other];

    /// Posted value, which doubles as the visible option label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Subsidy => "助成金コンサルティング",
            Self::PublicTender => "公共事業入札支援",
            Self::AiServices => "AI活用サービス",
            Self::Other => "その他",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == value.trim())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FieldError {
    MissingCompany,
    MissingName,
    MissingEmail,
    InvalidEmail,
    MissingCategory,
    MissingMessage,
    PrivacyNotAccepted,
}

impl FieldError {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingCompany => "missing_company",
            Self::MissingName => "missing_name",
            Self::MissingEmail => "missing_email",
            Self::InvalidEmail => "invalid_email",
            Self::MissingCategory => "missing_category",
            Self::MissingMessage => "missing_message",
            Self::PrivacyNotAccepted => "privacy_not_accepted",
        }
    }

    pub fn field(self) -> &'static str {
        match self {
            Self::MissingCompany => FIELD_COMPANY,
            Self::MissingName => FIELD_NAME,
            Self::MissingEmail | Self::InvalidEmail => FIELD_EMAIL,
            Self::MissingCategory => FIELD_CATEGORY,
            Self::MissingMessage => FIELD_MESSAGE,
            Self::PrivacyNotAccepted => FIELD_PRIVACY,
        }
    }
}

/// A consultation request as posted to the relay.
#[derive(Clone, PartialEq, Debug)]
pub struct Inquiry {
    pub company: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub category: Category,
    pub message: String,
    pub privacy_accepted: bool,
}

impl Inquiry {
    /// Collects fields by name and applies the same constraints the form's
    /// `required` and `type=email` attributes express, in document order.
    /// Like `valueMissing`, only an absent or empty value counts as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, FieldError> {
        let required = |name: &str, error: FieldError| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(error)
        };

        let company = required(FIELD_COMPANY, FieldError::MissingCompany)?;
        let name = required(FIELD_NAME, FieldError::MissingName)?;
        // `type=email` values are sanitized before the required check.
        let email = lookup(FIELD_EMAIL)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(FieldError::MissingEmail)?;
        if !is_valid_email(&email) {
            return Err(FieldError::InvalidEmail);
        }
        let phone = lookup(FIELD_PHONE)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let category = lookup(FIELD_CATEGORY)
            .as_deref()
            .and_then(Category::from_str)
            .ok_or(FieldError::MissingCategory)?;
        let message = required(FIELD_MESSAGE, FieldError::MissingMessage)?;
        let privacy_accepted = lookup(FIELD_PRIVACY).is_some_and(|value| !value.is_empty());
        if !privacy_accepted {
            return Err(FieldError::PrivacyNotAccepted);
        }

        Ok(Self {
            company,
            name,
            email,
            phone,
            category,
            message,
            privacy_accepted,
        })
    }

    /// `application/x-www-form-urlencoded` body, field for field what a
    /// native form post would send.
    pub fn form_body(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer
            .append_pair(FIELD_COMPANY, &self.company)
            .append_pair(FIELD_NAME, &self.name)
            .append_pair(FIELD_EMAIL, &self.email);
        if let Some(phone) = self.phone.as_deref() {
            serializer.append_pair(FIELD_PHONE, phone);
        }
        serializer
            .append_pair(FIELD_CATEGORY, self.category.as_str())
            .append_pair(FIELD_MESSAGE, &self.message);
        if self.privacy_accepted {
            serializer.append_pair(FIELD_PRIVACY, CHECKBOX_ON);
        }
        serializer.finish()
    }
}

/// Rough equivalent of the browser's `type=email` check: one `@`, a
/// non-empty local part, and dot-separated non-empty domain labels.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }

    if value.chars().any(char::is_whitespace) {
        return false;
    }

    domain.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SubmitError {
    Network,
    Rejected,
    HttpStatus(u16),
}

impl SubmitError {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Rejected => "rejected",
            Self::HttpStatus(_) => "http_status",
        }
    }
}

#[derive(Deserialize)]
struct RelayReply {
    ok: Option<bool>,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

/// Classifies the relay's answer. A 2xx whose body is not the expected
/// JSON still counts as delivered.
pub fn interpret_reply(status: u16, body: &str) -> Result<(), SubmitError> {
    let reply = serde_json::from_str::<RelayReply>(body).ok();
    let rejected = reply
        .as_ref()
        .is_some_and(|reply| reply.ok == Some(false) || !reply.errors.is_empty());

    match status {
        200..=299 if !rejected => Ok(()),
        200..=299 => Err(SubmitError::Rejected),
        _ if rejected => Err(SubmitError::Rejected),
        _ => Err(SubmitError::HttpStatus(status)),
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SubmitStatus {
    Idle,
    Sending,
    Sent,
    Failed(SubmitError),
}

impl SubmitStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Sending => "sending",
            Self::Sent => "sent",
            Self::Failed(_) => "failed",
        }
    }

    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Sending => Some("送信中です…"),
            Self::Sent => Some("送信しました。24時間以内にご返信いたします。"),
            Self::Failed(SubmitError::Rejected) => {
                Some("入力内容を確認のうえ、もう一度お試しください。")
            }
            Self::Failed(_) => Some("送信に失敗しました。時間をおいて再度お試しいただくか、メールでご連絡ください。"),
        }
    }

    pub fn is_sending(self) -> bool {
        matches!(self, Self::Sending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn complete_form() -> HashMap<&'static str, String> {
        HashMap::from([
            (FIELD_COMPANY, "株式会社サンプル".to_string()),
            (FIELD_NAME, "山田 太郎".to_string()),
            (FIELD_EMAIL, "taro@example.co.jp".to_string()),
            (FIELD_PHONE, "".to_string()),
            (FIELD_CATEGORY, "公共事業入札支援".to_string()),
            (FIELD_MESSAGE, "入札の相談です & 見積もり希望".to_string()),
            (FIELD_PRIVACY, "on".to_string()),
        ])
    }

    fn parse(form: &HashMap<&'static str, String>) -> Result<Inquiry, FieldError> {
        Inquiry::from_lookup(|name| form.get(name).cloned())
    }

    #[test]
    fn complete_form_encodes_every_field() {
        let mut form = complete_form();
        form.insert(FIELD_PHONE, "080-0000-0000".to_string());

        let inquiry = parse(&form).expect("all required fields present");
        let body = inquiry.form_body();
        let pairs: HashMap<String, String> = form_urlencoded::parse(body.as_bytes()).into_owned().collect();

        assert_eq!(pairs.len(), 7);
        assert_eq!(pairs["company"], "株式会社サンプル");
        assert_eq!(pairs["name"], "山田 太郎");
        assert_eq!(pairs["email"], "taro@example.co.jp");
        assert_eq!(pairs["phone"], "080-0000-0000");
        assert_eq!(pairs["category"], "公共事業入札支援");
        assert_eq!(pairs["message"], "入札の相談です & 見積もり希望");
        assert_eq!(pairs["privacy"], "on");
        assert!(body.contains("name=%E5%B1%B1%E7%94%B0+%E5%A4%AA%E9%83%8E"));
    }

    #[test]
    fn empty_phone_is_left_out() {
        let inquiry = parse(&complete_form()).expect("phone is optional");
        assert_eq!(inquiry.phone, None);
        assert!(!inquiry.form_body().contains("phone="));
    }

    #[test]
    fn empty_email_blocks_submission() {
        let mut form = complete_form();
        form.insert(FIELD_EMAIL, "".to_string());
        assert_eq!(parse(&form), Err(FieldError::MissingEmail));

        form.insert(FIELD_EMAIL, "  ".to_string());
        assert_eq!(parse(&form), Err(FieldError::MissingEmail));

        form.remove(FIELD_EMAIL);
        assert_eq!(parse(&form), Err(FieldError::MissingEmail));
    }

    #[test]
    fn whitespace_only_required_fields_still_submit() {
        let mut form = complete_form();
        form.insert(FIELD_COMPANY, "   ".to_string());
        form.insert(FIELD_NAME, "\t".to_string());
        form.insert(FIELD_MESSAGE, "   ".to_string());

        let inquiry = parse(&form).expect("browsers accept whitespace in required text fields");
        assert_eq!(inquiry.company, "   ");
        assert_eq!(inquiry.message, "   ");
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut form = complete_form();
        form.insert(FIELD_EMAIL, "taro.example.co.jp".to_string());
        let error = parse(&form).expect_err("no @");
        assert_eq!(error, FieldError::InvalidEmail);
        assert_eq!(error.field(), FIELD_EMAIL);
    }

    #[test]
    fn unchecked_privacy_box_blocks_submission() {
        let mut form = complete_form();
        form.remove(FIELD_PRIVACY);
        assert_eq!(parse(&form), Err(FieldError::PrivacyNotAccepted));
    }

    #[test]
    fn placeholder_category_counts_as_missing() {
        let mut form = complete_form();
        form.insert(FIELD_CATEGORY, "".to_string());
        assert_eq!(parse(&form), Err(FieldError::MissingCategory));

        form.insert(FIELD_CATEGORY, "営業".to_string());
        assert_eq!(parse(&form), Err(FieldError::MissingCategory));
    }

    #[test]
    fn first_missing_field_in_document_order_is_reported() {
        let mut form = complete_form();
        form.remove(FIELD_NAME);
        form.remove(FIELD_MESSAGE);
        assert_eq!(parse(&form), Err(FieldError::MissingName));
    }

    #[test]
    fn email_check_matches_common_browser_cases() {
        assert!(is_valid_email("info@souki-cp.co.jp"));
        assert!(is_valid_email("a@localhost"));
        assert!(!is_valid_email("a@@b.jp"));
        assert!(!is_valid_email("@b.jp"));
        assert!(!is_valid_email("a@b..jp"));
        assert!(!is_valid_email("a b@c.jp"));
        assert!(!is_valid_email("a@-b.jp"));
    }

    #[test]
    fn category_values_round_trip_through_labels() {
        for category in Category::ALL {
            assert_eq!(Category::from_str(category.as_str()), Some(category));
        }
    }

    #[test]
    fn relay_reply_classification() {
        assert_eq!(interpret_reply(200, r#"{"ok":true,"next":"/thanks"}"#), Ok(()));
        assert_eq!(interpret_reply(200, "<html>thanks</html>"), Ok(()));
        assert_eq!(interpret_reply(200, r#"{"ok":false}"#), Err(SubmitError::Rejected));
        assert_eq!(
            interpret_reply(422, r#"{"errors":[{"field":"email","message":"should be an email"}]}"#),
            Err(SubmitError::Rejected)
        );
        assert_eq!(interpret_reply(503, ""), Err(SubmitError::HttpStatus(503)));
    }

    #[test]
    fn status_messages_only_exist_after_submit() {
        assert_eq!(SubmitStatus::Idle.message(), None);
        assert!(SubmitStatus::Sending.is_sending());
        assert!(SubmitStatus::Sent.message().is_some());
        assert_eq!(SubmitStatus::Failed(SubmitError::Network).as_str(), "failed");
    }
}
