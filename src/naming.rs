//! Go identifier casing.

/// Maps arbitrary names to valid, exported Go identifiers.
pub trait IdentifierCase: Send + Sync {
    fn to_go_name(&self, name: &str) -> String;
}

impl<F> IdentifierCase for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn to_go_name(&self, name: &str) -> String {
        self(name)
    }
}

/// Initialisms that Go style keeps upper-cased.
const INITIALISMS: &[&str] = &[
    "ACL", "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID",
    "IP", "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP", "TLS",
    "TTL", "UDP", "UI", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML", "XMPP", "XSRF", "XSS",
];

/// Default casing: `pet_id` and `petId` both become `PetID`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoNames;

impl IdentifierCase for GoNames {
    fn to_go_name(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len());
        for word in split_words(name) {
            let upper = word.to_uppercase();
            if INITIALISMS.contains(&upper.as_str()) {
                out.push_str(&upper);
                continue;
            }
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }

        if out.is_empty() {
            return "Empty".to_string();
        }
        if out.starts_with(|c: char| c.is_ascii_digit()) {
            out.insert_str(0, "Nr");
        }
        out
    }
}

/// Split on non-alphanumerics and on case changes (`HTTPServer` ->
/// `HTTP`, `Server`).
fn split_words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
