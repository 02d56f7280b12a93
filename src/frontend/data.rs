//! Derived identifiers.
use std::fmt;
use std::path::Path;

/// The problem set number, taken from the first run of digits in the input
/// file's base name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SetNumber(pub u32);

impl Default for SetNumber {
    fn default() -> Self {
        SetNumber(1)
    }
}

impl SetNumber {
    pub fn from_path(path: &Path) -> SetNumber {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .map(SetNumber::from_name)
            .unwrap_or_default()
    }
    pub fn from_name(name: &str) -> SetNumber {
        let start = match name.find(|c: char| c.is_ascii_digit()) {
            Some(start) => start,
            None => return SetNumber::default(),
        };
        let digits = &name[start..];
        let len = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        match digits[..len].parse::<u32>() {
            Ok(number) => SetNumber(number),
            Err(_) => {
                log::warn!("set number `{}` is out of range; using 1", &digits[..len]);
                SetNumber::default()
            }
        }
    }
}

impl fmt::Display for SetNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// `S<set>P<index>`, both zero-padded to two digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProblemId {
    pub set: SetNumber,
    /// 1-based position among the document's problems.
    pub index: u32,
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}P{:02}", self.set, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_number_from_first_digit_run() {
        assert_eq!(SetNumber::from_path(Path::new("set7_draft.tex")).to_string(), "07");
        assert_eq!(SetNumber::from_path(Path::new("dir9/hw12v3.tex")), SetNumber(12));
        assert_eq!(SetNumber::from_path(Path::new("notes.tex")), SetNumber(1));
    }

    #[test]
    fn problem_ids_are_padded() {
        let set = SetNumber::from_path(Path::new("hw2.tex"));
        assert_eq!(ProblemId {set, index: 1}.to_string(), "S02P01");
        assert_eq!(ProblemId {set: SetNumber(123), index: 10}.to_string(), "S123P10");
    }
}
