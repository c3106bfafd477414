use catalyseed_core::models::{InnovationCategory, ScoreAxis, Scorecard};
use catalyseed_core::{AppError, FieldError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Editable story form state as submitted by an admin.
///
/// `id` distinguishes create from edit. Score entries are raw form input
/// and are clamped into range when the scorecard is built; counters and
/// creation metadata are never part of the draft.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct StoryDraft {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, message = "required"))]
    pub innovator_name: String,
    #[validate(length(min = 1, message = "required"))]
    pub mobile: String,
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    pub web_address: Option<String>,
    pub linkedin_profile: Option<String>,
    pub innovation_category: InnovationCategory,
    #[validate(length(min = 1, message = "required"))]
    pub year_of_innovation: String,
    pub ai_verdict: Option<String>,
    /// Already-uploaded inventor photo URL carried over on edit.
    pub inventor_photo: Option<String>,
    /// Already-uploaded picture URLs the editor chose to keep.
    pub retained_pictures: Vec<String>,
    #[validate(length(min = 1, message = "required"))]
    pub about_startup: String,
    #[validate(length(min = 1, message = "required"))]
    pub current_stage: String,
    pub fund_raised_details: Option<String>,
    pub team_details: String,
    #[validate(length(min = 1, message = "required"))]
    pub student_alumni_of: String,
    #[validate(length(min = 1, message = "required"))]
    pub year_or_batch: String,
    #[validate(length(min = 1, message = "required"))]
    pub business_address: String,
    #[validate(length(min = 1, message = "required"))]
    pub company_startup_name: String,
    #[validate(length(min = 1, message = "required"))]
    pub product_service_name: String,
    pub customer_segment: Option<String>,
    pub looking_for_investor: bool,
    pub investment_range: Option<String>,
    pub mentor_connect: bool,
    pub mentor_domain_details: Option<String>,
    pub tags: Vec<String>,
    /// Raw score entries in [`ScoreAxis::ALL`] order.
    pub scores: [i32; 8],
}

impl StoryDraft {
    /// Blank draft for the create flow.
    pub fn new() -> Self {
        Self {
            id: None,
            innovator_name: String::new(),
            mobile: String::new(),
            email: String::new(),
            web_address: None,
            linkedin_profile: None,
            innovation_category: InnovationCategory::Other,
            year_of_innovation: String::new(),
            ai_verdict: None,
            inventor_photo: None,
            retained_pictures: Vec::new(),
            about_startup: String::new(),
            current_stage: String::new(),
            fund_raised_details: None,
            team_details: String::new(),
            student_alumni_of: String::new(),
            year_or_batch: String::new(),
            business_address: String::new(),
            company_startup_name: String::new(),
            product_service_name: String::new(),
            customer_segment: None,
            looking_for_investor: false,
            investment_range: None,
            mentor_connect: false,
            mentor_domain_details: None,
            tags: Vec::new(),
            scores: [0; 8],
        }
    }

    /// Pre-filled draft for the edit flow.
    pub fn from_story(story: &catalyseed_core::models::SuccessStory) -> Self {
        let mut scores = [0i32; 8];
        for (slot, axis) in scores.iter_mut().zip(ScoreAxis::ALL) {
            *slot = story.scorecard.get(axis) as i32;
        }
        Self {
            id: Some(story.id),
            innovator_name: story.innovator_name.clone(),
            mobile: story.mobile.clone(),
            email: story.email.clone(),
            web_address: story.web_address.clone(),
            linkedin_profile: story.linkedin_profile.clone(),
            innovation_category: story.innovation_category,
            year_of_innovation: story.year_of_innovation.clone(),
            ai_verdict: story.ai_verdict.clone(),
            inventor_photo: story.inventor_photo.clone(),
            retained_pictures: story.product_service_pictures.clone(),
            about_startup: story.about_startup.clone(),
            current_stage: story.current_stage.clone(),
            fund_raised_details: story.fund_raised_details.clone(),
            team_details: story.team_details.clone(),
            student_alumni_of: story.student_alumni_of.clone(),
            year_or_batch: story.year_or_batch.clone(),
            business_address: story.business_address.clone(),
            company_startup_name: story.company_startup_name.clone(),
            product_service_name: story.product_service_name.clone(),
            customer_segment: story.customer_segment.clone(),
            looking_for_investor: story.looking_for_investor,
            investment_range: story.investment_range.clone(),
            mentor_connect: story.mentor_connect,
            mentor_domain_details: story.mentor_domain_details.clone(),
            tags: story.tags.clone(),
            scores,
        }
    }

    /// Validates all required fields, reporting one error per field in
    /// store schema (camelCase) names. Submission is blocked until every
    /// error is resolved.
    pub fn ensure_valid(&self) -> Result<(), AppError> {
        match self.validate() {
            Ok(()) => Ok(()),
            Err(errors) => {
                let mut fields: Vec<FieldError> = errors
                    .field_errors()
                    .into_iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            let message = e
                                .message
                                .as_deref()
                                .unwrap_or("invalid")
                                .to_string();
                            FieldError::new(camel_case(field.as_ref()), message)
                        })
                    })
                    .collect();
                fields.sort_by(|a, b| a.field.cmp(&b.field));
                Err(AppError::FieldValidation(fields))
            }
        }
    }

    /// Scorecard built from the raw entries, clamped into range.
    pub fn scorecard(&self) -> Scorecard {
        let mut card = Scorecard::default();
        for (axis, &raw) in ScoreAxis::ALL.iter().zip(self.scores.iter()) {
            card.set(*axis, raw);
        }
        card
    }
}

impl Default for StoryDraft {
    fn default() -> Self {
        Self::new()
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
