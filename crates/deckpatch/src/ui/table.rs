use tabled::settings::{Panel, Style};
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Default)]
pub struct Formatter {
    pub footer: Option<String>,
}

impl Formatter {
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn build<T: Tabled, I: IntoIterator<Item = T>>(self, rows: I) -> Table {
        let mut table = Table::new(rows);
        if let Some(footer) = self.footer {
            table.with(Panel::footer(footer));
        }
        table.with(Style::blank());
        table
    }
}
