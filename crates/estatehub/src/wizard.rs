//! Linear step counters for the multi-step flows (listing, claim, onboarding).
//!
//! Each flow is a fixed, ordered table of steps. Movement is forward/back one step at a time,
//! plus jumping to any step already reached.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub trait WizardStep: Copy + Eq + Debug + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|step| *step == self)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStep {
    Category,
    Details,
    Location,
    Media,
    Pricing,
    Contact,
    Promotion,
    Review,
}

impl WizardStep for ListingStep {
    const ALL: &'static [Self] = &[
        ListingStep::Category,
        ListingStep::Details,
        ListingStep::Location,
        ListingStep::Media,
        ListingStep::Pricing,
        ListingStep::Contact,
        ListingStep::Promotion,
        ListingStep::Review,
    ];

    fn label(self) -> &'static str {
        match self {
            ListingStep::Category => "Choose category",
            ListingStep::Details => "Property details",
            ListingStep::Location => "Location",
            ListingStep::Media => "Photos & video",
            ListingStep::Pricing => "Pricing",
            ListingStep::Contact => "Contact information",
            ListingStep::Promotion => "Promote your ad",
            ListingStep::Review => "Review & submit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStep {
    SelectProperty,
    Ownership,
    Documents,
    Review,
}

impl WizardStep for ClaimStep {
    const ALL: &'static [Self] = &[
        ClaimStep::SelectProperty,
        ClaimStep::Ownership,
        ClaimStep::Documents,
        ClaimStep::Review,
    ];

    fn label(self) -> &'static str {
        match self {
            ClaimStep::SelectProperty => "Find your property",
            ClaimStep::Ownership => "Your relationship",
            ClaimStep::Documents => "Proof of ownership",
            ClaimStep::Review => "Review claim",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Role,
    Profile,
    Preferences,
    Finish,
}

impl WizardStep for OnboardingStep {
    const ALL: &'static [Self] = &[
        OnboardingStep::Role,
        OnboardingStep::Profile,
        OnboardingStep::Preferences,
        OnboardingStep::Finish,
    ];

    fn label(self) -> &'static str {
        match self {
            OnboardingStep::Role => "How will you use the marketplace?",
            OnboardingStep::Profile => "Profile",
            OnboardingStep::Preferences => "Preferences",
            OnboardingStep::Finish => "All set",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition<S> {
    Moved { from: S, to: S },
    Stayed(S),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wizard<S: WizardStep> {
    current: usize,
    furthest: usize,
    _marker: std::marker::PhantomData<S>,
}

impl<S: WizardStep> Default for Wizard<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: WizardStep> Wizard<S> {
    pub fn new() -> Self {
        Self {
            current: 0,
            furthest: 0,
            _marker: std::marker::PhantomData,
        }
    }

    pub fn current(&self) -> S {
        S::ALL[self.current]
    }

    /// Furthest step reached so far.
    pub fn furthest(&self) -> S {
        S::ALL[self.furthest]
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == S::ALL.len()
    }

    /// Fraction of steps completed before the current one, in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        let last = S::ALL.len().saturating_sub(1);
        if last == 0 {
            return 1.0;
        }
        self.current as f32 / last as f32
    }

    pub fn next(&mut self) -> Transition<S> {
        if self.is_last() {
            return Transition::Stayed(self.current());
        }
        self.move_to(self.current + 1)
    }

    pub fn back(&mut self) -> Transition<S> {
        if self.is_first() {
            return Transition::Stayed(self.current());
        }
        self.move_to(self.current - 1)
    }

    /// Jump to a step already reached, or the one right after the furthest.
    pub fn go_to(&mut self, step: S) -> Transition<S> {
        let target = step.index();
        if target > self.furthest + 1 || target == self.current {
            return Transition::Stayed(self.current());
        }
        self.move_to(target)
    }

    fn move_to(&mut self, target: usize) -> Transition<S> {
        let from = self.current();
        self.current = target;
        self.furthest = self.furthest.max(target);
        let to = self.current();
        debug!(?from, ?to, "wizard step changed");
        Transition::Moved { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_and_back_clamp_at_ends() {
        let mut wizard = Wizard::<ClaimStep>::new();
        assert_eq!(wizard.back(), Transition::Stayed(ClaimStep::SelectProperty));

        for _ in 0..3 {
            assert!(matches!(wizard.next(), Transition::Moved { .. }));
        }
        assert!(wizard.is_last());
        assert_eq!(wizard.next(), Transition::Stayed(ClaimStep::Review));
        assert_eq!(wizard.progress(), 1.0);
    }

    #[test]
    fn go_to_cannot_skip_ahead() {
        let mut wizard = Wizard::<ListingStep>::new();
        assert_eq!(
            wizard.go_to(ListingStep::Pricing),
            Transition::Stayed(ListingStep::Category)
        );
        assert_eq!(
            wizard.go_to(ListingStep::Details),
            Transition::Moved {
                from: ListingStep::Category,
                to: ListingStep::Details
            }
        );
        wizard.next();
        wizard.next();
        assert_eq!(wizard.current(), ListingStep::Media);

        assert!(matches!(
            wizard.go_to(ListingStep::Category),
            Transition::Moved { .. }
        ));
        assert_eq!(wizard.furthest(), ListingStep::Media);
        assert!(matches!(
            wizard.go_to(ListingStep::Media),
            Transition::Moved { .. }
        ));
    }

    #[test]
    fn labels_and_indices_follow_table_order() {
        assert_eq!(OnboardingStep::Finish.index(), 3);
        assert_eq!(ListingStep::Promotion.label(), "Promote your ad");
        let wizard = Wizard::<OnboardingStep>::new();
        assert_eq!(wizard.progress(), 0.0);
    }
}
