//! Entity type identifiers.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Every record type stored by the event manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Venue,
    User,
    EventUser,
    Collaborator,
    Organizer,
    Installer,
    Attendee,
    HardwareManufacturer,
    Hardware,
    Software,
    Installation,
    ActivityType,
    Activity,
    TalkType,
    TalkProposal,
    Room,
    TalkTime,
    Talk,
    Comment,
    ContactType,
    Contact,
    EventInfo,
}

impl EntityKind {
    /// All kinds in declaration order.
    pub const ALL: [EntityKind; 22] = [
        Self::Venue,
        Self::User,
        Self::EventUser,
        Self::Collaborator,
        Self::Organizer,
        Self::Installer,
        Self::Attendee,
        Self::HardwareManufacturer,
        Self::Hardware,
        Self::Software,
        Self::Installation,
        Self::ActivityType,
        Self::Activity,
        Self::TalkType,
        Self::TalkProposal,
        Self::Room,
        Self::TalkTime,
        Self::Talk,
        Self::Comment,
        Self::ContactType,
        Self::Contact,
        Self::EventInfo,
    ];

    /// Stable snake_case identifier used by the CLI and in exports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Venue => "venue",
            Self::User => "user",
            Self::EventUser => "event_user",
            Self::Collaborator => "collaborator",
            Self::Organizer => "organizer",
            Self::Installer => "installer",
            Self::Attendee => "attendee",
            Self::HardwareManufacturer => "hardware_manufacturer",
            Self::Hardware => "hardware",
            Self::Software => "software",
            Self::Installation => "installation",
            Self::ActivityType => "activity_type",
            Self::Activity => "activity",
            Self::TalkType => "talk_type",
            Self::TalkProposal => "talk_proposal",
            Self::Room => "room",
            Self::TalkTime => "talk_time",
            Self::Talk => "talk",
            Self::Comment => "comment",
            Self::ContactType => "contact_type",
            Self::Contact => "contact",
            Self::EventInfo => "event_info",
        }
    }

    /// Parses a stable identifier. Matching is exact after trimming.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::EntityKind;
    use std::collections::HashSet;

    #[test]
    fn identifiers_are_unique_and_parse_back() {
        let mut seen = HashSet::new();
        for kind in EntityKind::ALL {
            assert!(seen.insert(kind.as_str()), "duplicate id {kind}");
            assert_eq!(EntityKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn parse_trims_but_rejects_other_spellings() {
        assert_eq!(EntityKind::parse(" comment "), Some(EntityKind::Comment));
        assert_eq!(EntityKind::parse("Comment"), None);
        assert_eq!(EntityKind::parse("talkproposal"), None);
        assert_eq!(EntityKind::parse(""), None);
    }
}
