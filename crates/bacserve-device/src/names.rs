//! Sequential, human-readable object names.

const COLORS: [&str; 25] = [
    "Amber",
    "Bronze",
    "Chartreuse",
    "Diamond",
    "Emerald",
    "Fuchsia",
    "Gold",
    "Hot Pink",
    "Indigo",
    "Kiwi",
    "Lilac",
    "Magenta",
    "Nickel",
    "Onyx",
    "Purple",
    "Quartz",
    "Red",
    "Silver",
    "Turquoise",
    "Umber",
    "Vermilion",
    "White",
    "Xanadu",
    "Yellow",
    "Zebra White",
];

/// Hands out color names in a fixed order.
///
/// Once the palette wraps, names carry the lap number (`"Amber 1"`,
/// `"Amber 2"`, ...) so a single allocator never repeats itself.
#[derive(Debug, Clone, Default)]
pub struct NameAllocator {
    next: usize,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_color(&mut self) -> String {
        let color = COLORS[self.next % COLORS.len()];
        let lap = self.next / COLORS.len();
        self.next += 1;
        if lap == 0 {
            color.to_string()
        } else {
            format!("{color} {lap}")
        }
    }

    /// `"<prefix> <color>"`, e.g. `"AnalogInput Amber"`.
    pub fn next_name(&mut self, prefix: &str) -> String {
        format!("{prefix} {}", self.next_color())
    }

    pub fn allocated(&self) -> usize {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::NameAllocator;
    use std::collections::HashSet;

    #[test]
    fn names_follow_palette_order() {
        let mut names = NameAllocator::new();
        assert_eq!(names.next_name("AnalogInput"), "AnalogInput Amber");
        assert_eq!(names.next_name("AnalogInput"), "AnalogInput Bronze");
        assert_eq!(names.allocated(), 2);
    }

    #[test]
    fn wrapped_palette_never_repeats() {
        let mut names = NameAllocator::new();
        let all: Vec<String> = (0..80).map(|_| names.next_color()).collect();
        let unique: HashSet<&String> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
        assert_eq!(all[25], "Amber 1");
        assert_eq!(all[50], "Amber 2");
    }

    #[test]
    fn separate_allocators_are_reproducible() {
        let mut a = NameAllocator::new();
        let mut b = NameAllocator::new();
        for _ in 0..30 {
            assert_eq!(a.next_color(), b.next_color());
        }
    }
}
