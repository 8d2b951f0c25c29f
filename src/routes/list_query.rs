use serde::Deserialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const DEFAULT_SORT_COLUMN: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    // "desc" is the only token that flips the order
    fn parse(token: &str) -> Self {
        if token == "desc" {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

/******************************************/
// Query parameters shared by list routes
/******************************************/
// Everything is extracted as a raw optional string so that no query-string
// shape can ever fail extraction; malformed values degrade to defaults in
// the accessors below.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    page: Option<String>,
    #[serde(rename = "pageSize")]
    page_size: Option<String>,
    sort: Option<String>,
    name: Option<String>,
}

impl ListParams {
    pub fn page(&self) -> i64 {
        positive_or(self.page.as_deref(), DEFAULT_PAGE)
    }

    pub fn page_size(&self) -> i64 {
        positive_or(self.page_size.as_deref(), DEFAULT_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.page_size()
    }

    pub fn limit(&self) -> i64 {
        self.page_size()
    }

    // `sort=column:direction`; anything that is not exactly two tokens
    // falls back to the whole default pair
    pub fn sort(&self) -> (&str, SortDirection) {
        let raw = self.sort.as_deref().unwrap_or("");
        let parts: Vec<&str> = raw.split(':').collect();
        if parts.len() == 2 {
            (parts[0], SortDirection::parse(parts[1]))
        } else {
            (DEFAULT_SORT_COLUMN, SortDirection::Asc)
        }
    }

    // ILIKE pattern for the name filter; empty means no filter
    pub fn name_pattern(&self) -> Option<String> {
        match self.name.as_deref() {
            Some(value) if !value.is_empty() => Some(format!("%{}%", value)),
            _ => None,
        }
    }
}

fn positive_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|value| value.parse::<i64>().ok())
        .filter(|value| *value >= 1)
        .unwrap_or(default)
}
