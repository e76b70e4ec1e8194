/// A BACnet date. The year is stored as an offset from 1900.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Date {
    pub year_since_1900: u8,
    pub month: u8,
    pub day: u8,
    /// 1 = Monday … 7 = Sunday.
    pub weekday: u8,
}

impl Date {
    /// Years outside 1900..=2155 are clamped to the nearest end.
    pub const fn new(year: u16, month: u8, day: u8, weekday: u8) -> Self {
        let offset = year.saturating_sub(1900);
        Self {
            year_since_1900: if offset > u8::MAX as u16 {
                u8::MAX
            } else {
                offset as u8
            },
            month,
            day,
            weekday,
        }
    }

    pub const fn year(self) -> u16 {
        1900 + self.year_since_1900 as u16
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub hundredths: u8,
}

impl Time {
    pub const fn new(hour: u8, minute: u8, second: u8, hundredths: u8) -> Self {
        Self {
            hour,
            minute,
            second,
            hundredths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Date;

    #[test]
    fn year_is_stored_relative_to_1900() {
        let date = Date::new(2019, 6, 7, 5);
        assert_eq!(date.year_since_1900, 119);
        assert_eq!(date.year(), 2019);
    }

    #[test]
    fn out_of_range_years_clamp() {
        assert_eq!(Date::new(2155, 1, 1, 1).year(), 2155);
        assert_eq!(Date::new(2300, 1, 1, 1).year(), 2155);
        assert_eq!(Date::new(1850, 1, 1, 1).year(), 1900);
    }
}
