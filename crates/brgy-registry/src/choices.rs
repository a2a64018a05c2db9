//! Fixed option lists offered by the registration and update forms.

pub const SELECT_STREET: &str = "Select Street";
pub const SELECT_CIVIL_STATUS: &str = "Select Civil Status";
pub const SELECT_RELATION: &str = "Select Relation";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sex {
    Male,
    Female,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CivilStatus {
    Single,
    Married,
    Widowed,
    Separated,
    Divorced,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Street {
    Gold,
    Bronze,
    Silver,
    Platinum,
    Diamond,
    Pearl,
    Ruby,
    Emerald,
    Sapphire,
    Jade,
}

/// Suggestions only; any other nationality may be typed in.
pub const NATIONALITIES: &[&str] = &[
    "Filipino",
    "American",
    "Chinese",
    "Japanese",
    "Korean",
    "British",
    "Australian",
    "Canadian",
    "Indian",
    "Other",
];

pub const HOUSEHOLD_RELATIONS: &[&str] = &[
    "Head of Family",
    "Spouse",
    "Son",
    "Daughter",
    "Father",
    "Mother",
    "Brother",
    "Sister",
    "Grandfather",
    "Grandmother",
    "Grandson",
    "Granddaughter",
    "Uncle",
    "Aunt",
    "Nephew",
    "Niece",
    "Cousin",
    "Son-in-law",
    "Daughter-in-law",
    "Other",
];

pub const EMERGENCY_RELATIONS: &[&str] = &[
    "Spouse",
    "Parent",
    "Sibling",
    "Child",
    "Grandparent",
    "Grandchild",
    "Uncle/Aunt",
    "Cousin",
    "Friend",
    "Neighbor",
    "Other",
];

/// Maps the text of a dropdown to `None` when it shows the placeholder entry
/// (or nothing at all).
pub fn unless_placeholder(text: &str, placeholder: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() || text == placeholder {
        None
    } else {
        Some(text.to_owned())
    }
}

macro_rules! impl_choice_name {
    {
        Enum $enum_type:ident; $($variant:ident => $name:literal),+
    } => {
        impl $enum_type {
            pub const ALL: &'static [$enum_type] = &[$($enum_type::$variant),+];

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some($enum_type::$variant)),+,
                    _ => None,
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $($enum_type::$variant => $name),+,
                }
            }
        }

        impl std::fmt::Display for $enum_type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

impl_choice_name! {
    Enum Sex;
    Male => "Male",
    Female => "Female"
}

impl_choice_name! {
    Enum CivilStatus;
    Single => "Single",
    Married => "Married",
    Widowed => "Widowed",
    Separated => "Separated",
    Divorced => "Divorced"
}

impl_choice_name! {
    Enum Street;
    Gold => "Gold Street",
    Bronze => "Bronze Street",
    Silver => "Silver Street",
    Platinum => "Platinum Street",
    Diamond => "Diamond Street",
    Pearl => "Pearl Street",
    Ruby => "Ruby Street",
    Emerald => "Emerald Street",
    Sapphire => "Sapphire Street",
    Jade => "Jade Street"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_maps_every_street_name_back_to_its_variant() {
        for street in Street::ALL {
            assert_eq!(Street::from_name(street.name()), Some(*street));
        }
        assert_eq!(Street::ALL.len(), 10);
        assert_eq!(Street::from_name(SELECT_STREET), None);
    }

    #[test]
    fn it_rejects_unknown_names() {
        assert_eq!(Sex::from_name("male"), None);
        assert_eq!(CivilStatus::from_name(SELECT_CIVIL_STATUS), None);
        assert_eq!(CivilStatus::from_name("Divorced"), Some(CivilStatus::Divorced));
    }

    #[test]
    fn it_turns_placeholders_into_none() {
        assert_eq!(unless_placeholder("Select Relation", SELECT_RELATION), None);
        assert_eq!(unless_placeholder("  ", SELECT_RELATION), None);
        assert_eq!(
            unless_placeholder(" Spouse ", SELECT_RELATION),
            Some("Spouse".to_owned())
        );
    }
}
