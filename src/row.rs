// src/row.rs

/// Where a row came from in the source table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RowKind {
    Header,
    Data,
}

/// Contents of the last column of a data row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Link {
    Href(String),
    Missing,
}

impl Link {
    pub fn href(&self) -> Option<&str> {
        match self {
            Link::Href(h) => Some(h),
            Link::Missing => None,
        }
    }

    /// Render for output; `Missing` becomes `sentinel`.
    pub fn render<'a>(&'a self, sentinel: &'a str) -> &'a str {
        self.href().unwrap_or(sentinel)
    }
}

/// One scraped table row.
///
/// `cells` holds the display text of every column but the last; the last
/// column of a data row is kept as a [`Link`]. Header rows and rows reduced
/// to their name carry no link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub kind: RowKind,
    pub cells: Vec<String>,
    pub link: Option<Link>,
}

impl Row {
    pub fn header(cells: Vec<String>) -> Self {
        Self {
            kind: RowKind::Header,
            cells,
            link: None,
        }
    }

    pub fn data(cells: Vec<String>, link: Link) -> Self {
        Self {
            kind: RowKind::Data,
            cells,
            link: Some(link),
        }
    }

    /// The name column (field 0), if the row has any text cells.
    pub fn name(&self) -> Option<&str> {
        self.cells.first().map(String::as_str)
    }

    pub fn field_count(&self) -> usize {
        self.cells.len() + usize::from(self.link.is_some())
    }

    /// Flatten into output fields, substituting `sentinel` for a missing link.
    pub fn to_fields(&self, sentinel: &str) -> Vec<String> {
        let mut out = Vec::with_capacity(self.field_count());
        out.extend(self.cells.iter().cloned());
        if let Some(link) = &self.link {
            out.push(link.render(sentinel).to_string());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_carries_no_link_column() {
        let header = Row::header(vec!["Name".into(), "Kind".into()]);
        let data = Row::data(vec!["Applejack".into()], Link::Missing);
        assert_eq!(header.field_count(), 2);
        assert_eq!(data.field_count(), 2);
        assert_eq!(header.kind, RowKind::Header);
        assert_eq!(data.kind, RowKind::Data);
    }

    #[test]
    fn missing_link_renders_as_sentinel() {
        let row = Row::data(vec!["Pinkie Pie".into()], Link::Missing);
        assert_eq!(row.to_fields("None"), vec!["Pinkie Pie", "None"]);
        assert_eq!(row.to_fields(""), vec!["Pinkie Pie", ""]);
    }

    #[test]
    fn href_renders_verbatim() {
        let row = Row::data(vec!["Rarity".into()], Link::Href("/img/rarity.png".into()));
        assert_eq!(row.to_fields("None"), vec!["Rarity", "/img/rarity.png"]);
        assert_eq!(row.name(), Some("Rarity"));
    }
}
