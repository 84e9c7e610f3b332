use askama::Template;

use crate::models::Submission;

#[derive(Template)]
#[template(path = "email/contact_notification.html")]
struct ContactNotificationHtml<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
    sent_at: String,
}

#[derive(Template)]
#[template(path = "email/contact_notification.txt")]
struct ContactNotificationText<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
    sent_at: String,
}

fn sent_at(submission: &Submission) -> String {
    submission
        .timestamp
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

/// HTML body of the operator notification. All submitter text is escaped.
pub fn render_contact_html(submission: &Submission) -> Result<String, askama::Error> {
    ContactNotificationHtml {
        name: &submission.name,
        email: &submission.email,
        message: &submission.message,
        sent_at: sent_at(submission),
    }
    .render()
}

pub fn render_contact_text(submission: &Submission) -> Result<String, askama::Error> {
    ContactNotificationText {
        name: &submission.name,
        email: &submission.email,
        message: &submission.message,
        sent_at: sent_at(submission),
    }
    .render()
}
