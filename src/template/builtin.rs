//! Built-in template set registered at startup.
//!
//! Covers the six candidate-facing event types. Each template declares the
//! exact variable names callers must supply; optional fields (meeting link,
//! on-site location) are wrapped in conditional blocks so they disappear
//! cleanly when absent.

use std::collections::BTreeSet;

use super::types::Template;

fn declared(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// The default template set, in registration order
pub fn default_templates() -> Vec<Template> {
    vec![
        Template {
            id: "application-status-v1".to_string(),
            event_type: "application-status".to_string(),
            subject_template: "Application Update: {{position}} at {{company}}".to_string(),
            html_body_template: concat!(
                "<p>Hi {{candidateName}},</p>",
                "<p>Your application for <strong>{{position}}</strong> at ",
                "<strong>{{company}}</strong> has moved from {{oldStatus}} to ",
                "<strong>{{newStatus}}</strong>.</p>",
                "{{#nextSteps}}<p>Next steps: {{nextSteps}}</p>{{/nextSteps}}",
                "<p>You can review your application any time: ",
                "<a href=\"{{applicationUrl}}\">View application</a></p>",
            )
            .to_string(),
            text_body_template: concat!(
                "Hi {{candidateName}},\n\n",
                "Your application for {{position}} at {{company}} has moved from ",
                "{{oldStatus}} to {{newStatus}}.\n",
                "{{#nextSteps}}Next steps: {{nextSteps}}\n{{/nextSteps}}",
                "\nView your application: {{applicationUrl}}\n",
            )
            .to_string(),
            declared_variables: declared(&[
                "candidateName",
                "position",
                "company",
                "oldStatus",
                "newStatus",
                "nextSteps",
                "applicationUrl",
            ]),
            active: true,
        },
        Template {
            id: "interview-scheduled-v1".to_string(),
            event_type: "interview-scheduled".to_string(),
            subject_template: "Interview Scheduled: {{position}} at {{company}}".to_string(),
            html_body_template: concat!(
                "<p>Hi {{candidateName}},</p>",
                "<p>Your {{interviewType}} interview for <strong>{{position}}</strong> at ",
                "<strong>{{company}}</strong> is confirmed.</p>",
                "<ul>",
                "<li>Date: {{interviewDate}}</li>",
                "<li>Time: {{interviewTime}} ({{duration}})</li>",
                "<li>Interviewer: {{interviewer}}</li>",
                "</ul>",
                "{{#meetingLink}}<p>Join online: <a href=\"{{meetingLink}}\">{{meetingLink}}</a></p>{{/meetingLink}}",
                "{{#location}}<p>Location: {{location}}</p>{{/location}}",
                "<p><a href=\"{{calendarUrl}}\">Add to calendar</a> &middot; ",
                "<a href=\"{{rescheduleUrl}}\">Reschedule</a></p>",
            )
            .to_string(),
            text_body_template: concat!(
                "Hi {{candidateName}},\n\n",
                "Your {{interviewType}} interview for {{position}} at {{company}} is confirmed.\n\n",
                "Date: {{interviewDate}}\n",
                "Time: {{interviewTime}} ({{duration}})\n",
                "Interviewer: {{interviewer}}\n",
                "{{#meetingLink}}Join online: {{meetingLink}}\n{{/meetingLink}}",
                "{{#location}}Location: {{location}}\n{{/location}}",
                "\nAdd to calendar: {{calendarUrl}}\n",
                "Reschedule: {{rescheduleUrl}}\n",
            )
            .to_string(),
            declared_variables: declared(&[
                "candidateName",
                "position",
                "company",
                "interviewDate",
                "interviewTime",
                "duration",
                "interviewType",
                "interviewer",
                "meetingLink",
                "location",
                "calendarUrl",
                "rescheduleUrl",
            ]),
            active: true,
        },
        Template {
            id: "interview-reminder-v1".to_string(),
            event_type: "interview-reminder".to_string(),
            subject_template:
                "Reminder: {{interviewType}} interview {{interviewDate}} at {{interviewTime}}"
                    .to_string(),
            html_body_template: concat!(
                "<p>Hi {{candidateName}},</p>",
                "<p>A reminder that your {{interviewType}} interview for ",
                "<strong>{{position}}</strong> at <strong>{{company}}</strong> is coming up ",
                "on {{interviewDate}} at {{interviewTime}}.</p>",
                "{{#meetingLink}}<p>Join online: <a href=\"{{meetingLink}}\">{{meetingLink}}</a></p>{{/meetingLink}}",
                "{{#location}}<p>Location: {{location}}</p>{{/location}}",
                "<p><a href=\"{{rescheduleUrl}}\">Need to reschedule?</a></p>",
            )
            .to_string(),
            text_body_template: concat!(
                "Hi {{candidateName}},\n\n",
                "A reminder that your {{interviewType}} interview for {{position}} at ",
                "{{company}} is coming up on {{interviewDate}} at {{interviewTime}}.\n",
                "{{#meetingLink}}Join online: {{meetingLink}}\n{{/meetingLink}}",
                "{{#location}}Location: {{location}}\n{{/location}}",
                "\nNeed to reschedule? {{rescheduleUrl}}\n",
            )
            .to_string(),
            declared_variables: declared(&[
                "candidateName",
                "position",
                "company",
                "interviewDate",
                "interviewTime",
                "interviewType",
                "meetingLink",
                "location",
                "rescheduleUrl",
            ]),
            active: true,
        },
        Template {
            id: "offer-letter-v1".to_string(),
            event_type: "offer-letter".to_string(),
            subject_template: "Your Offer from {{company}}".to_string(),
            html_body_template: concat!(
                "<p>Hi {{candidateName}},</p>",
                "<p>Congratulations! {{company}} is delighted to offer you the role of ",
                "<strong>{{position}}</strong>.</p>",
                "<p>Please review and respond by {{responseDeadline}}: ",
                "<a href=\"{{offerUrl}}\">View offer</a></p>",
            )
            .to_string(),
            text_body_template: concat!(
                "Hi {{candidateName}},\n\n",
                "Congratulations! {{company}} is delighted to offer you the role of ",
                "{{position}}.\n\n",
                "Please review and respond by {{responseDeadline}}: {{offerUrl}}\n",
            )
            .to_string(),
            declared_variables: declared(&[
                "candidateName",
                "position",
                "company",
                "responseDeadline",
                "offerUrl",
            ]),
            active: true,
        },
        Template {
            id: "rejection-v1".to_string(),
            event_type: "rejection".to_string(),
            subject_template: "Update on your application to {{company}}".to_string(),
            html_body_template: concat!(
                "<p>Hi {{candidateName}},</p>",
                "<p>Thank you for your interest in the {{position}} role at {{company}}. ",
                "After careful consideration we have decided not to move forward with ",
                "your application.</p>",
                "{{#feedback}}<p>{{feedback}}</p>{{/feedback}}",
                "<p>We encourage you to apply for future openings.</p>",
            )
            .to_string(),
            text_body_template: concat!(
                "Hi {{candidateName}},\n\n",
                "Thank you for your interest in the {{position}} role at {{company}}. ",
                "After careful consideration we have decided not to move forward with ",
                "your application.\n",
                "{{#feedback}}\n{{feedback}}\n{{/feedback}}",
                "\nWe encourage you to apply for future openings.\n",
            )
            .to_string(),
            declared_variables: declared(&["candidateName", "position", "company", "feedback"]),
            active: true,
        },
        Template {
            id: "welcome-v1".to_string(),
            event_type: "welcome".to_string(),
            subject_template: "Welcome to {{company}} Careers".to_string(),
            html_body_template: concat!(
                "<p>Hi {{candidateName}},</p>",
                "<p>Welcome! Your candidate profile at {{company}} is ready. ",
                "You will receive updates here as your applications progress.</p>",
            )
            .to_string(),
            text_body_template: concat!(
                "Hi {{candidateName}},\n\n",
                "Welcome! Your candidate profile at {{company}} is ready. ",
                "You will receive updates here as your applications progress.\n",
            )
            .to_string(),
            declared_variables: declared(&["candidateName", "company"]),
            active: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_templates_are_valid() {
        for template in default_templates() {
            template.validate().unwrap();
        }
    }

    #[test]
    fn test_one_active_template_per_event_type() {
        let templates = default_templates();
        let mut seen = std::collections::HashSet::new();
        for template in &templates {
            assert!(template.active);
            assert!(seen.insert(template.event_type.clone()));
        }
        assert_eq!(templates.len(), 6);
    }

    #[test]
    fn test_interview_scheduled_declares_required_variables() {
        let templates = default_templates();
        let interview = templates
            .iter()
            .find(|t| t.event_type == "interview-scheduled")
            .unwrap();

        for name in [
            "candidateName",
            "position",
            "company",
            "interviewDate",
            "interviewTime",
            "duration",
            "interviewType",
            "interviewer",
            "calendarUrl",
            "rescheduleUrl",
        ] {
            assert!(
                interview.declared_variables.contains(name),
                "missing {name}"
            );
        }
    }
}
