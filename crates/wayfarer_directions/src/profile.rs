use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// https://openrouteservice.org/dev/#/api-docs/v2/directions/{profile}/get
#[derive(Debug, Deserialize, Serialize, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum DirectionsProfile {
    #[default]
    DrivingCar,
    DrivingHgv,
    CyclingRegular,
    FootWalking,
}

impl Display for DirectionsProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DirectionsProfile::DrivingCar => "driving-car",
                DirectionsProfile::DrivingHgv => "driving-hgv",
                DirectionsProfile::CyclingRegular => "cycling-regular",
                DirectionsProfile::FootWalking => "foot-walking",
            }
        )
    }
}

impl FromStr for DirectionsProfile {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "driving-car" => Ok(DirectionsProfile::DrivingCar),
            "driving-hgv" => Ok(DirectionsProfile::DrivingHgv),
            "cycling-regular" => Ok(DirectionsProfile::CyclingRegular),
            "foot-walking" => Ok(DirectionsProfile::FootWalking),
            other => Err(format!("Unknown directions profile '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_parse() {
        for profile in [
            DirectionsProfile::DrivingCar,
            DirectionsProfile::DrivingHgv,
            DirectionsProfile::CyclingRegular,
            DirectionsProfile::FootWalking,
        ] {
            assert_eq!(profile.to_string().parse::<DirectionsProfile>(), Ok(profile));
        }

        assert!("hovercraft".parse::<DirectionsProfile>().is_err());
    }
}
