const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Style {
    /// `HH:MM:SS`, or `MM:SS` under an hour
    #[default]
    Clock,
    /// `1 hours, 2 minutes, 5 seconds`
    Readable,
}

impl Style {
    pub fn from_readable(readable: bool) -> Self {
        if readable {
            Style::Readable
        } else {
            Style::Clock
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Breakdown {
    pub weeks: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Breakdown {
    pub fn from_seconds(total: u64) -> Self {
        Self {
            weeks: total / WEEK,
            days: total % WEEK / DAY,
            hours: total % DAY / HOUR,
            minutes: total % HOUR / MINUTE,
            seconds: total % MINUTE,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.weeks * WEEK + self.days * DAY + self.hours * HOUR + self.minutes * MINUTE + self.seconds
    }
}

pub fn format_length(label: &str, seconds: u64, style: Style) -> String {
    match style {
        Style::Clock => format_clock(label, seconds),
        Style::Readable => format_readable(label, seconds),
    }
}

// Hours are not folded into days here; 100+ hours simply widen the field.
pub fn format_clock(label: &str, seconds: u64) -> String {
    let hours = seconds / HOUR;
    let minutes = seconds % HOUR / MINUTE;
    let secs = seconds % MINUTE;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}\t{}", hours, minutes, secs, label)
    } else {
        format!("{:02}:{:02}\t{}", minutes, secs, label)
    }
}

pub fn format_readable(label: &str, seconds: u64) -> String {
    let b = Breakdown::from_seconds(seconds);

    let mut parts: Vec<String> = [
        (b.weeks, "weeks"),
        (b.days, "days"),
        (b.hours, "hours"),
        (b.minutes, "minutes"),
    ]
    .iter()
    .filter(|(n, _)| *n > 0)
    .map(|(n, unit)| format!("{} {}", n, unit))
    .collect();
    parts.push(format!("{} seconds", b.seconds));

    format!("{}: {}", label, parts.join(", "))
}
