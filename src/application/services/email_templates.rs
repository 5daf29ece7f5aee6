//! Branded transactional email bodies.
//!
//! Each message type is an askama template extending `emails/base.html`. All
//! caller-supplied values are HTML-escaped by the template engine.

use askama::Template;
use serde::Deserialize;

use crate::domain::entities::EmailType;
use crate::domain::entities::style::string_or_number;

const BRAND_COLOR: &str = "#1B3A5C";
const WARNING_COLOR: &str = "#D97706";

/// Optional per-message values supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailData {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub doc_type: Option<String>,
    #[serde(default)]
    pub credits_remaining: Option<i64>,
    #[serde(default)]
    pub plan_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub amount: Option<String>,
    #[serde(default)]
    pub days_left: Option<i64>,
}

/// Links and addresses shared by every message.
#[derive(Debug, Clone)]
pub struct EmailLinks {
    pub app_url: String,
    pub support_address: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

#[derive(Template)]
#[template(path = "emails/welcome.html")]
struct WelcomeEmail<'a> {
    support_address: &'a str,
    first_name: &'a str,
    footer_note: &'a str,
    button_label: &'a str,
    button_url: String,
    button_color: &'a str,
}

#[derive(Template)]
#[template(path = "emails/document_ready.html")]
struct DocumentReadyEmail<'a> {
    support_address: &'a str,
    first_name: &'a str,
    doc_type: &'a str,
    button_label: &'a str,
    button_url: String,
    button_color: &'a str,
}

#[derive(Template)]
#[template(path = "emails/credits_low.html")]
struct CreditsLowEmail<'a> {
    support_address: &'a str,
    first_name: &'a str,
    credits_remaining: i64,
    plan_name: &'a str,
    footer_note: &'a str,
    button_label: &'a str,
    button_url: String,
    button_color: &'a str,
}

#[derive(Template)]
#[template(path = "emails/payment_receipt.html")]
struct PaymentReceiptEmail<'a> {
    support_address: &'a str,
    first_name: &'a str,
    plan_name: &'a str,
    amount: &'a str,
    footer_note: &'a str,
    button_label: &'a str,
    button_url: String,
    button_color: &'a str,
}

#[derive(Template)]
#[template(path = "emails/subscription_cancelled.html")]
struct SubscriptionCancelledEmail<'a> {
    support_address: &'a str,
    first_name: &'a str,
    footer_note: &'a str,
    button_label: &'a str,
    button_url: String,
    button_color: &'a str,
}

#[derive(Template)]
#[template(path = "emails/trial_ending.html")]
struct TrialEndingEmail<'a> {
    support_address: &'a str,
    first_name: &'a str,
    days_left: i64,
    footer_note: &'a str,
    button_label: &'a str,
    button_url: String,
    button_color: &'a str,
}

/// Greeting name: the first word of the user name (or address), cut at `@`.
pub fn first_name<'a>(user_name: Option<&'a str>, email: &'a str) -> &'a str {
    let source = user_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(if email.is_empty() { "there" } else { email });

    let word = source.split_whitespace().next().unwrap_or(source);
    word.split('@').next().unwrap_or(word)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Renders the subject and HTML body of `email_type`.
pub fn render(
    email_type: EmailType,
    to: &str,
    data: &EmailData,
    links: &EmailLinks,
) -> Result<RenderedEmail, askama::Error> {
    let first_name = first_name(data.user_name.as_deref(), to);
    let support_address = links.support_address.as_str();
    let dashboard_url = format!("{}/dashboard.html", links.app_url);
    let settings_url = format!("{}/settings.html", links.app_url);

    let rendered = match email_type {
        EmailType::Welcome => RenderedEmail {
            subject: "Welcome to DraftMyForms!".to_string(),
            html: WelcomeEmail {
                support_address,
                first_name,
                footer_note: "You received this because you signed up for DraftMyForms.",
                button_label: "Go to Dashboard",
                button_url: dashboard_url,
                button_color: BRAND_COLOR,
            }
            .render()?,
        },
        EmailType::DocumentReady => {
            let doc_type = non_empty(&data.doc_type).unwrap_or("Document");
            RenderedEmail {
                subject: format!("Your {doc_type} is Ready"),
                html: DocumentReadyEmail {
                    support_address,
                    first_name,
                    doc_type,
                    button_label: "View Document",
                    button_url: dashboard_url,
                    button_color: BRAND_COLOR,
                }
                .render()?,
            }
        }
        EmailType::CreditsLow => {
            let credits_remaining = data.credits_remaining.unwrap_or(0);
            RenderedEmail {
                subject: format!("You have {credits_remaining} credit(s) left"),
                html: CreditsLowEmail {
                    support_address,
                    first_name,
                    credits_remaining,
                    plan_name: non_empty(&data.plan_name).unwrap_or("Free"),
                    footer_note: "Your credits refresh at the start of each billing cycle.",
                    button_label: "Upgrade Plan",
                    button_url: settings_url,
                    button_color: WARNING_COLOR,
                }
                .render()?,
            }
        }
        EmailType::PaymentReceipt => {
            let plan_name = non_empty(&data.plan_name).unwrap_or("Pro");
            RenderedEmail {
                subject: format!("Payment Confirmed - {plan_name} Plan"),
                html: PaymentReceiptEmail {
                    support_address,
                    first_name,
                    plan_name,
                    amount: non_empty(&data.amount).unwrap_or("9.99"),
                    footer_note: "This is your payment receipt. Save it for your records.",
                    button_label: "Go to Dashboard",
                    button_url: dashboard_url,
                    button_color: BRAND_COLOR,
                }
                .render()?,
            }
        }
        EmailType::SubscriptionCancelled => RenderedEmail {
            subject: "Your DraftMyForms Subscription Has Been Cancelled".to_string(),
            html: SubscriptionCancelledEmail {
                support_address,
                first_name,
                footer_note: "Your documents are still safe and accessible on the free plan.",
                button_label: "Resubscribe",
                button_url: settings_url,
                button_color: BRAND_COLOR,
            }
            .render()?,
        },
        EmailType::TrialEnding => {
            let days_left = data.days_left.filter(|d| *d != 0).unwrap_or(3);
            RenderedEmail {
                subject: format!("Your Trial Ends in {days_left} Days"),
                html: TrialEndingEmail {
                    support_address,
                    first_name,
                    days_left,
                    footer_note: "Your trial features will be downgraded when the trial expires.",
                    button_label: "Subscribe Now",
                    button_url: settings_url,
                    button_color: WARNING_COLOR,
                }
                .render()?,
            }
        }
    };

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn links() -> EmailLinks {
        EmailLinks {
            app_url: "https://www.draftmyforms.com".to_string(),
            support_address: "support@draftmyforms.com".to_string(),
        }
    }

    #[test]
    fn test_first_name() {
        assert_eq!(first_name(Some("Jane Doe"), "x@y.co"), "Jane");
        assert_eq!(first_name(None, "jane@example.com"), "jane");
        assert_eq!(first_name(Some("  "), "bob@example.com"), "bob");
        assert_eq!(first_name(None, ""), "there");
    }

    #[test]
    fn test_every_type_renders() {
        for email_type in EmailType::ALL {
            let email = render(email_type, "jane@example.com", &EmailData::default(), &links())
                .unwrap();
            assert!(email.html.contains("DraftMyForms"));
            assert!(email.html.contains("Hey jane") || email.html.contains("Welcome aboard, jane"));
            assert!(!email.subject.is_empty());
        }
    }

    #[test]
    fn test_subjects_use_defaults_and_data() {
        let data: EmailData = serde_json::from_value(json!({
            "docType": "Invoice",
            "creditsRemaining": 1,
            "planName": "Business",
            "amount": 24.99,
            "daysLeft": 2
        }))
        .unwrap();

        let subject = |t| render(t, "a@b.co", &data, &links()).unwrap().subject;
        assert_eq!(subject(EmailType::DocumentReady), "Your Invoice is Ready");
        assert_eq!(subject(EmailType::CreditsLow), "You have 1 credit(s) left");
        assert_eq!(subject(EmailType::PaymentReceipt), "Payment Confirmed - Business Plan");
        assert_eq!(subject(EmailType::TrialEnding), "Your Trial Ends in 2 Days");

        let defaults = |t| render(t, "a@b.co", &EmailData::default(), &links()).unwrap().subject;
        assert_eq!(defaults(EmailType::DocumentReady), "Your Document is Ready");
        assert_eq!(defaults(EmailType::CreditsLow), "You have 0 credit(s) left");
        assert_eq!(defaults(EmailType::PaymentReceipt), "Payment Confirmed - Pro Plan");
        assert_eq!(defaults(EmailType::TrialEnding), "Your Trial Ends in 3 Days");
    }

    #[test]
    fn test_singular_credit_and_receipt_amount() {
        let data = EmailData {
            credits_remaining: Some(1),
            amount: Some("24.99".to_string()),
            ..Default::default()
        };

        let low = render(EmailType::CreditsLow, "a@b.co", &data, &links()).unwrap();
        assert!(low.html.contains("1 credit</strong>"));

        let receipt = render(EmailType::PaymentReceipt, "a@b.co", &data, &links()).unwrap();
        assert!(receipt.html.contains("$24.99"));
    }

    #[test]
    fn test_user_values_are_escaped() {
        let data = EmailData {
            user_name: Some("<script>alert(1)</script>".to_string()),
            doc_type: Some("<b>Invoice</b>".to_string()),
            ..Default::default()
        };

        let email = render(EmailType::DocumentReady, "a@b.co", &data, &links()).unwrap();
        assert!(!email.html.contains("<script>"));
        assert!(!email.html.contains("<b>Invoice</b>"));
        assert!(email.html.contains("Invoice"));
    }

    #[test]
    fn test_buttons_link_to_app() {
        let email = render(EmailType::Welcome, "a@b.co", &EmailData::default(), &links()).unwrap();
        assert!(email.html.contains("https://www.draftmyforms.com/dashboard.html"));
        assert!(email.html.contains("You received this because you signed up"));
    }
}
