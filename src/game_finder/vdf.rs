//! Tolerant line-oriented VDF (Valve Data Format) reader
//!
//! Both `libraryfolders.vdf` and `appmanifest_*.acf` are the same text
//! key/value format, one entry per line:
//!
//! ```text
//! "AppState"
//! {
//!     "appid"     "489830"
//!     "name"      "Skyrim Special Edition"
//! }
//! ```
//!
//! Lines are classified independently. Anything that does not look like a
//! key, a key/value pair or a brace is skipped instead of failing the file.

/// One classified line of a VDF document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VdfLine<'a> {
    /// `"key"   "value"`
    Pair { key: String, value: String },
    /// `"key"` on its own, opening a section on the next `{`
    Section(String),
    Open,
    Close,
    /// Blank, comment, or malformed
    Skip(&'a str),
}

/// Iterator over the classified lines of a VDF document
pub struct VdfLines<'a> {
    inner: std::str::Lines<'a>,
}

impl<'a> Iterator for VdfLines<'a> {
    type Item = VdfLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(classify_line)
    }
}

impl<'a> VdfLines<'a> {
    /// Only the `"key" "value"` entries, in document order
    pub fn pairs(self) -> impl Iterator<Item = (String, String)> + 'a {
        self.filter_map(|line| match line {
            VdfLine::Pair { key, value } => Some((key, value)),
            _ => None,
        })
    }
}

/// Read a VDF document line by line
pub fn lines(content: &str) -> VdfLines<'_> {
    VdfLines {
        inner: content.lines(),
    }
}

fn classify_line(raw: &str) -> VdfLine<'_> {
    let line = raw.trim();

    if line.is_empty() || line.starts_with("//") {
        return VdfLine::Skip(raw);
    }
    if line == "{" {
        return VdfLine::Open;
    }
    if line == "}" {
        return VdfLine::Close;
    }

    let Some(tokens) = quoted_tokens(line) else {
        return VdfLine::Skip(raw);
    };

    let mut tokens = tokens.into_iter();
    match (tokens.next(), tokens.next()) {
        (Some(key), Some(value)) => VdfLine::Pair { key, value },
        (Some(key), None) => VdfLine::Section(key),
        _ => VdfLine::Skip(raw),
    }
}

/// Collect the quoted tokens on a line, stopping at a trailing `//` comment.
///
/// Returns `None` for an unterminated token.
fn quoted_tokens(line: &str) -> Option<Vec<String>> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                let mut token = String::new();
                loop {
                    match chars.next()? {
                        '"' => break,
                        '\\' => match chars.next()? {
                            'n' => token.push('\n'),
                            't' => token.push('\t'),
                            '\\' => token.push('\\'),
                            '"' => token.push('"'),
                            other => {
                                token.push('\\');
                                token.push(other);
                            }
                        },
                        other => token.push(other),
                    }
                }
                tokens.push(token);
            }
            '/' if chars.peek() == Some(&'/') => break,
            _ => {}
        }
    }

    Some(tokens)
}

/// App id and display name read from an `appmanifest_*.acf` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppManifest {
    pub app_id: u32,
    pub name: String,
}

impl AppManifest {
    /// Scan for the first `appid` and the first `name`, stopping at `name`.
    ///
    /// A manifest whose `name` comes before any `appid`, or whose `appid` is
    /// not an integer, yields `None`.
    pub fn from_vdf(content: &str) -> Option<Self> {
        let mut app_id = None;
        let mut name = None;

        for (key, value) in lines(content).pairs() {
            match key.as_str() {
                "appid" if app_id.is_none() => app_id = value.trim().parse::<u32>().ok(),
                "name" => {
                    name = Some(value);
                    break;
                }
                _ => {}
            }
        }

        Some(Self {
            app_id: app_id?,
            name: name?,
        })
    }
}

/// Every `"path"` value in a `libraryfolders.vdf`, in document order
pub fn parse_library_folders(content: &str) -> Vec<String> {
    lines(content)
        .pairs()
        .filter(|(key, _)| key == "path")
        .map(|(_, value)| value)
        .collect()
}
