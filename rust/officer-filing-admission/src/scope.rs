/// Key under which the token scope carries the company it was issued for.
pub const COMPANY_NUMBER_KEY: &str = "company_number";

/// The company claim carried by a token permissions header.
///
/// The header is a sequence of `key=value` segments separated by whitespace
/// or commas, e.g.
/// `company_number=12345678 company_officers=create,delete,update,readprotected`.
/// Only the `company_number` segment is of interest here; anything that
/// cannot be read as such a segment is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionScope {
    company_number: Option<String>,
}

impl PermissionScope {
    /// Parse a scope from a raw header value. Never fails: absent or
    /// malformed input yields a scope without a company number.
    pub fn parse(raw: Option<&str>) -> Self {
        let company_number = raw.and_then(|raw| {
            raw.split(|c: char| c.is_whitespace() || c == ',')
                .filter_map(|segment| segment.split_once('='))
                .find(|(key, _)| *key == COMPANY_NUMBER_KEY)
                .map(|(_, value)| value)
                .filter(|value| !value.is_empty() && !value.contains('='))
                .map(str::to_owned)
        });

        Self { company_number }
    }

    /// The company number the token was scoped to, if any.
    pub fn company_number(&self) -> Option<&str> {
        self.company_number.as_deref()
    }
}
