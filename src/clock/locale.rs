/// Where the day-period marker sits relative to `h:mm`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeriodPlacement {
    /// `3:05 PM`
    Suffix,
    /// `午後3:05`
    Prefix,
    /// `오후 3:05`
    PrefixSpaced,
}

/// Day-period markers for the 12-hour clock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClockLocale {
    am: String,
    pm: String,
    placement: PeriodPlacement,
}

impl Default for ClockLocale {
    fn default() -> Self {
        Self::english()
    }
}

impl ClockLocale {
    /// Custom markers.
    pub fn new(am: impl Into<String>, pm: impl Into<String>, placement: PeriodPlacement) -> Self {
        Self {
            am: am.into(),
            pm: pm.into(),
            placement,
        }
    }

    /// `AM` / `PM` after the time.
    pub fn english() -> Self {
        Self::new("AM", "PM", PeriodPlacement::Suffix)
    }

    /// Resolve markers for a BCP-47 style tag such as `en-US` or `ja_JP`.
    ///
    /// Unknown languages fall back to English markers.
    pub fn from_tag(tag: &str) -> Self {
        let lang = tag
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match lang.as_str() {
            "es" => Self::new("a. m.", "p. m.", PeriodPlacement::Suffix),
            "ja" => Self::new("午前", "午後", PeriodPlacement::Prefix),
            "zh" => Self::new("上午", "下午", PeriodPlacement::Prefix),
            "ko" => Self::new("오전", "오후", PeriodPlacement::PrefixSpaced),
            _ => Self::english(),
        }
    }

    /// Markers for the current process locale.
    pub fn system() -> Self {
        match sys_locale::get_locale() {
            Some(tag) => Self::from_tag(&tag),
            None => Self::english(),
        }
    }

    /// Marker for the given half of the day.
    pub fn marker(&self, is_pm: bool) -> &str {
        if is_pm { &self.pm } else { &self.am }
    }

    pub(crate) fn decorate(&self, hour_minute: &str, is_pm: bool) -> String {
        let marker = self.marker(is_pm);
        match self.placement {
            PeriodPlacement::Suffix => format!("{hour_minute} {marker}"),
            PeriodPlacement::Prefix => format!("{marker}{hour_minute}"),
            PeriodPlacement::PrefixSpaced => format!("{marker} {hour_minute}"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/locale.rs"]
mod tests;
