/// ## Tagged value cell
///
/// The smallest addressable unit of machine memory. A cell holds a
/// number or owned text and is always replaced wholesale on store.
/// Reading across the tag converts: numbers format canonically,
/// text parses its longest leading numeric prefix (zero when none).
#[derive(Clone, Debug, PartialEq)]
pub enum Val {
    Number(f64),
    Text(String),
}

impl Default for Val {
    fn default() -> Val {
        Val::Number(0.0)
    }
}

impl Val {
    pub fn number(&self) -> f64 {
        match self {
            Val::Number(n) => *n,
            Val::Text(s) => Val::number_from_text(s),
        }
    }

    pub fn text(&self) -> String {
        match self {
            Val::Number(n) => Val::text_from_number(*n),
            Val::Text(s) => s.clone(),
        }
    }

    /// Longest leading numeric prefix, or zero. Never fails: programs
    /// routinely pass literal tokens through text cells and the
    /// machine must not guess at intent beyond "not a number is zero".
    pub fn number_from_text(s: &str) -> f64 {
        let s = s.trim_start();
        let bytes = s.as_bytes();
        let mut end = 0;
        let mut seen_digit = false;
        if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
            end += 1;
        }
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            seen_digit = true;
        }
        if end < bytes.len() && bytes[end] == b'.' {
            end += 1;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
                seen_digit = true;
            }
        }
        if seen_digit && end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
            let mut exp = end + 1;
            if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
                exp += 1;
            }
            if exp < bytes.len() && bytes[exp].is_ascii_digit() {
                end = exp;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
            }
        }
        if !seen_digit {
            return 0.0;
        }
        s[..end].parse().unwrap_or(0.0)
    }

    /// Whole finite values render without a decimal point, so numeric
    /// seven reads back as `7`.
    pub fn text_from_number(n: f64) -> String {
        if n.is_finite() && n == n.trunc() && n.abs() < 1e15 {
            format!("{}", n as i64)
        } else {
            format!("{}", n)
        }
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}
