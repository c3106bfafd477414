use serde::{Deserialize, Serialize};

use crate::constants::{MAX_AXIS_SCORE, MAX_TOTAL_SCORE};

/// One axis of the startup evaluation rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreAxis {
    ProblemClarity,
    MarketOpportunity,
    InnovationUsp,
    FounderStrength,
    Traction,
    Scalability,
    RevenueModel,
    ImpactPotential,
}

impl ScoreAxis {
    pub const ALL: [ScoreAxis; 8] = [
        ScoreAxis::ProblemClarity,
        ScoreAxis::MarketOpportunity,
        ScoreAxis::InnovationUsp,
        ScoreAxis::FounderStrength,
        ScoreAxis::Traction,
        ScoreAxis::Scalability,
        ScoreAxis::RevenueModel,
        ScoreAxis::ImpactPotential,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScoreAxis::ProblemClarity => "Problem Clarity",
            ScoreAxis::MarketOpportunity => "Market Opportunity",
            ScoreAxis::InnovationUsp => "Innovation / USP",
            ScoreAxis::FounderStrength => "Founder Strength",
            ScoreAxis::Traction => "Traction",
            ScoreAxis::Scalability => "Scalability",
            ScoreAxis::RevenueModel => "Revenue Model",
            ScoreAxis::ImpactPotential => "Impact Potential",
        }
    }
}

/// The 8-axis evaluation rubric attached to a success story.
///
/// Every axis is in [0, 5]; out-of-range input is clamped at the setter, not
/// rejected, so the form stays usable. The total is always derived from the
/// current axes and never edited independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Scorecard {
    pub problem_clarity: u8,
    pub market_opportunity: u8,
    #[serde(rename = "innovationUSP")]
    pub innovation_usp: u8,
    pub founder_strength: u8,
    pub traction: u8,
    pub scalability: u8,
    pub revenue_model: u8,
    pub impact_potential: u8,
}

impl Scorecard {
    /// Clamp a raw entry into the valid [0, 5] range.
    pub fn clamp_score(raw: i32) -> u8 {
        raw.clamp(0, MAX_AXIS_SCORE as i32) as u8
    }

    pub fn get(&self, axis: ScoreAxis) -> u8 {
        match axis {
            ScoreAxis::ProblemClarity => self.problem_clarity,
            ScoreAxis::MarketOpportunity => self.market_opportunity,
            ScoreAxis::InnovationUsp => self.innovation_usp,
            ScoreAxis::FounderStrength => self.founder_strength,
            ScoreAxis::Traction => self.traction,
            ScoreAxis::Scalability => self.scalability,
            ScoreAxis::RevenueModel => self.revenue_model,
            ScoreAxis::ImpactPotential => self.impact_potential,
        }
    }

    /// Set one axis from raw form input, clamping into range.
    pub fn set(&mut self, axis: ScoreAxis, raw: i32) {
        let value = Self::clamp_score(raw);
        match axis {
            ScoreAxis::ProblemClarity => self.problem_clarity = value,
            ScoreAxis::MarketOpportunity => self.market_opportunity = value,
            ScoreAxis::InnovationUsp => self.innovation_usp = value,
            ScoreAxis::FounderStrength => self.founder_strength = value,
            ScoreAxis::Traction => self.traction = value,
            ScoreAxis::Scalability => self.scalability = value,
            ScoreAxis::RevenueModel => self.revenue_model = value,
            ScoreAxis::ImpactPotential => self.impact_potential = value,
        }
    }

    /// Sum of all eight axes, in [0, 40].
    pub fn total(&self) -> u8 {
        ScoreAxis::ALL.iter().map(|&axis| self.get(axis)).sum()
    }

    /// Total expressed as a rounded percentage of the maximum.
    pub fn percent(&self) -> u8 {
        ((self.total() as f32 / MAX_TOTAL_SCORE as f32) * 100.0).round() as u8
    }

    /// Re-clamp every axis; used when hydrating documents written by older
    /// or external writers.
    pub fn normalized(mut self) -> Self {
        for axis in ScoreAxis::ALL {
            let value = self.get(axis);
            self.set(axis, value as i32);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> Scorecard {
        let mut card = Scorecard::default();
        card.set(ScoreAxis::ProblemClarity, 5);
        card.set(ScoreAxis::MarketOpportunity, 4);
        card.set(ScoreAxis::InnovationUsp, 3);
        card.set(ScoreAxis::FounderStrength, 5);
        card.set(ScoreAxis::Traction, 2);
        card.set(ScoreAxis::Scalability, 3);
        card.set(ScoreAxis::RevenueModel, 4);
        card.set(ScoreAxis::ImpactPotential, 4);
        card
    }

    #[test]
    fn total_is_sum_of_axes() {
        let card = filled();
        assert_eq!(card.total(), 30);
        assert_eq!(card.percent(), 75);
    }

    #[test]
    fn out_of_range_entries_are_clamped() {
        let mut card = Scorecard::default();
        card.set(ScoreAxis::Traction, 9);
        assert_eq!(card.get(ScoreAxis::Traction), 5);
        card.set(ScoreAxis::Traction, -3);
        assert_eq!(card.get(ScoreAxis::Traction), 0);
    }

    #[test]
    fn total_reflects_clamped_value_not_raw_entry() {
        let mut card = filled();
        card.set(ScoreAxis::Traction, 9); // stored as 5
        assert_eq!(card.total(), 33);
    }

    #[test]
    fn serialized_field_names_match_store_schema() {
        let json = serde_json::to_value(filled()).unwrap();
        assert_eq!(json["problemClarity"], 5);
        assert_eq!(json["innovationUSP"], 3);
        assert_eq!(json["impactPotential"], 4);
    }

    #[test]
    fn normalized_repairs_out_of_range_documents() {
        let card: Scorecard = serde_json::from_value(serde_json::json!({
            "problemClarity": 250,
            "traction": 2
        }))
        .unwrap();
        let card = card.normalized();
        assert_eq!(card.problem_clarity, 5);
        assert_eq!(card.traction, 2);
        assert_eq!(card.total(), 7);
    }
}
