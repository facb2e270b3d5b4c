//! The fixed table of version fields that can be rewritten.

use std::borrow::Cow;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SyntaxFamily {
    /// `[assembly: AssemblyVersion("1.0.0.0")]`
    CSharpAttribute,
    /// `<Assembly: AssemblyVersion("1.0.0.0")>`
    VisualBasicAttribute,
    /// `<Version>1.0.0.0</Version>`, the element name is carried along.
    XmlElement(&'static str),
}

/// An opening literal that introduces a version field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VersionMarker {
    pub opening: &'static str,
    pub syntax: SyntaxFamily,
}

pub const MARKERS: &[VersionMarker] = &[
    VersionMarker {
        opening: "[assembly: AssemblyVersion(\"",
        syntax: SyntaxFamily::CSharpAttribute,
    },
    VersionMarker {
        opening: "[assembly: AssemblyFileVersion(\"",
        syntax: SyntaxFamily::CSharpAttribute,
    },
    VersionMarker {
        opening: "<Assembly: AssemblyVersion(\"",
        syntax: SyntaxFamily::VisualBasicAttribute,
    },
    VersionMarker {
        opening: "<Assembly: AssemblyFileVersion(\"",
        syntax: SyntaxFamily::VisualBasicAttribute,
    },
    VersionMarker {
        opening: "<AssemblyVersion>",
        syntax: SyntaxFamily::XmlElement("AssemblyVersion"),
    },
    VersionMarker {
        opening: "<FileVersion>",
        syntax: SyntaxFamily::XmlElement("FileVersion"),
    },
    VersionMarker {
        opening: "<Version>",
        syntax: SyntaxFamily::XmlElement("Version"),
    },
];

impl VersionMarker {
    /// Text that has to follow the version for the field to be well formed.
    pub fn closing(&self) -> Cow<'static, str> {
        match self.syntax {
            SyntaxFamily::CSharpAttribute | SyntaxFamily::VisualBasicAttribute => {
                if self.opening.starts_with('[') {
                    Cow::Borrowed("\")]")
                } else {
                    Cow::Borrowed("\")>")
                }
            }
            SyntaxFamily::XmlElement(name) => Cow::Owned(format!("</{name}>")),
        }
    }

    /// The character that ends the version text inside the field.
    pub fn terminator(&self) -> char {
        match self.syntax {
            SyntaxFamily::CSharpAttribute | SyntaxFamily::VisualBasicAttribute => '"',
            SyntaxFamily::XmlElement(_) => '<',
        }
    }

    /// Column of the marker in `line`, if the line can hold a field of this kind.
    pub fn find_in(&self, line: &str) -> Option<usize> {
        if line.len() <= self.opening.len() {
            return None;
        }
        line.find(self.opening)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(opening: &str) -> VersionMarker {
        *MARKERS
            .iter()
            .find(|m| m.opening == opening)
            .unwrap()
    }

    #[test]
    fn test_table_has_all_markers() {
        assert_eq!(MARKERS.len(), 7);
    }

    #[test]
    fn test_attribute_closing_text() {
        assert_eq!(marker("[assembly: AssemblyVersion(\"").closing(), "\")]");
        assert_eq!(marker("[assembly: AssemblyFileVersion(\"").closing(), "\")]");
        assert_eq!(marker("<Assembly: AssemblyVersion(\"").closing(), "\")>");
        assert_eq!(marker("<Assembly: AssemblyFileVersion(\"").closing(), "\")>");
    }

    #[test]
    fn test_element_closing_text() {
        assert_eq!(marker("<AssemblyVersion>").closing(), "</AssemblyVersion>");
        assert_eq!(marker("<FileVersion>").closing(), "</FileVersion>");
        assert_eq!(marker("<Version>").closing(), "</Version>");
    }

    #[test]
    fn test_terminators() {
        assert_eq!(marker("[assembly: AssemblyVersion(\"").terminator(), '"');
        assert_eq!(marker("<Version>").terminator(), '<');
    }

    #[test]
    fn test_find_in_matches_substring() {
        let version = marker("<Version>");
        assert_eq!(version.find_in("    <Version>1.0.0.0</Version>"), Some(4));
        assert_eq!(version.find_in("<Version>1.0.0.0</Version>"), Some(0));
        assert_eq!(version.find_in("<PackageVersion>1.0.0.0</PackageVersion>"), None);
    }

    #[test]
    fn test_find_in_requires_longer_line() {
        let version = marker("<Version>");
        assert_eq!(version.find_in("<Version>"), None);
        assert_eq!(version.find_in("<Version>1"), Some(0));
    }

    #[test]
    fn test_markers_do_not_cross_match() {
        let line = "<AssemblyVersion>1.0.0.0</AssemblyVersion>";
        let hits: Vec<_> = MARKERS.iter().filter(|m| m.find_in(line).is_some()).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].opening, "<AssemblyVersion>");
    }
}
