//! Provider symbol index to weather condition mapping.
//!
//! The feed encodes conditions as an integer: 1-16 for day, the same
//! condition at 101-116 for night, 0 when the provider could not
//! determine a symbol. The mapping is total; an unseen index becomes an
//! explicit unknown label instead of an error.

/// The sixteen conditions the provider distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    ClearSky,
    LightClouds,
    PartlyCloudy,
    Cloudy,
    Rain,
    RainSnowSleet,
    Snow,
    RainShower,
    SnowShower,
    SleetShower,
    LightFog,
    DenseFog,
    FreezingRain,
    Thunderstorms,
    Drizzle,
    Sandstorm,
}

impl ConditionKind {
    /// Map a 1-16 index to its condition.
    fn from_index(index: i64) -> Option<Self> {
        match index {
            1 => Some(Self::ClearSky),
            2 => Some(Self::LightClouds),
            3 => Some(Self::PartlyCloudy),
            4 => Some(Self::Cloudy),
            5 => Some(Self::Rain),
            6 => Some(Self::RainSnowSleet),
            7 => Some(Self::Snow),
            8 => Some(Self::RainShower),
            9 => Some(Self::SnowShower),
            10 => Some(Self::SleetShower),
            11 => Some(Self::LightFog),
            12 => Some(Self::DenseFog),
            13 => Some(Self::FreezingRain),
            14 => Some(Self::Thunderstorms),
            15 => Some(Self::Drizzle),
            16 => Some(Self::Sandstorm),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ClearSky => "Clear sky",
            Self::LightClouds => "Light clouds",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Cloudy => "Cloudy",
            Self::Rain => "Rain",
            Self::RainSnowSleet => "Rain and snow / sleet",
            Self::Snow => "Snow",
            Self::RainShower => "Rain shower",
            Self::SnowShower => "Snow shower",
            Self::SleetShower => "Sleet shower",
            Self::LightFog => "Light fog",
            Self::DenseFog => "Dense fog",
            Self::FreezingRain => "Freezing rain",
            Self::Thunderstorms => "Thunderstorms",
            Self::Drizzle => "Drizzle",
            Self::Sandstorm => "Sandstorm",
        }
    }
}

/// Weather condition derived from the provider's symbol index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCondition {
    Day(ConditionKind),
    Night(ConditionKind),
    /// Symbol 0: the provider could not determine a symbol.
    Undetermined,
    /// Any index outside the documented ranges.
    Unknown,
}

impl WeatherCondition {
    pub fn from_symbol(symbol: i64) -> Self {
        match symbol {
            0 => Self::Undetermined,
            1..=16 => ConditionKind::from_index(symbol)
                .map(Self::Day)
                .unwrap_or(Self::Unknown),
            101..=116 => ConditionKind::from_index(symbol - 100)
                .map(Self::Night)
                .unwrap_or(Self::Unknown),
            _ => Self::Unknown,
        }
    }

    /// Display label, matching the provider's documented wording.
    pub fn label(&self) -> String {
        match self {
            Self::Day(kind) => kind.description().to_string(),
            Self::Night(kind) => format!("{} (night)", kind.description()),
            Self::Undetermined => "A weather symbol could not be determined".to_string(),
            Self::Unknown => "Unknown weather symbol".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_day_symbols_have_labels() {
        let expected = [
            "Clear sky",
            "Light clouds",
            "Partly cloudy",
            "Cloudy",
            "Rain",
            "Rain and snow / sleet",
            "Snow",
            "Rain shower",
            "Snow shower",
            "Sleet shower",
            "Light fog",
            "Dense fog",
            "Freezing rain",
            "Thunderstorms",
            "Drizzle",
            "Sandstorm",
        ];
        for (index, label) in expected.iter().enumerate() {
            let symbol = index as i64 + 1;
            assert_eq!(WeatherCondition::from_symbol(symbol).label(), *label);
        }
    }

    #[test]
    fn night_symbols_carry_the_night_suffix() {
        for symbol in 101..=116 {
            let label = WeatherCondition::from_symbol(symbol).label();
            assert!(label.ends_with(" (night)"), "symbol {symbol}: {label}");
            // Same condition as the day form.
            let day = WeatherCondition::from_symbol(symbol - 100).label();
            assert_eq!(label, format!("{day} (night)"));
        }
    }

    #[test]
    fn symbol_zero_is_undetermined() {
        assert_eq!(
            WeatherCondition::from_symbol(0),
            WeatherCondition::Undetermined
        );
        assert_eq!(
            WeatherCondition::from_symbol(0).label(),
            "A weather symbol could not be determined"
        );
    }

    #[test]
    fn out_of_range_symbols_never_panic() {
        for symbol in [-1, 17, 100, 117, 9999] {
            assert_eq!(WeatherCondition::from_symbol(symbol), WeatherCondition::Unknown);
        }
        assert_eq!(
            WeatherCondition::from_symbol(42).label(),
            "Unknown weather symbol"
        );
    }
}
