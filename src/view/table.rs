use serde_json::{Map, Value};

type Accessor<R> = Box<dyn Fn(&R) -> String + Send + Sync>;

pub struct Column<R> {
    pub key: &'static str,
    pub header: &'static str,
    accessor: Accessor<R>,
}

impl<R> Column<R> {
    pub fn new(key: &'static str, header: &'static str, accessor: impl Fn(&R) -> String + Send + Sync + 'static) -> Self {
        Self {
            key,
            header,
            accessor: Box::new(accessor),
        }
    }

    pub fn cell(&self, row: &R) -> String {
        (self.accessor)(row)
    }
}

/// Column definitions for a row type; renders aligned text or JSON rows
pub struct Table<R> {
    columns: Vec<Column<R>>,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self { columns: Vec::new() }
    }
}

impl<R> Table<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(
        mut self,
        key: &'static str,
        header: &'static str,
        accessor: impl Fn(&R) -> String + Send + Sync + 'static,
    ) -> Self {
        self.columns.push(Column::new(key, header, accessor));
        self
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.header).collect()
    }

    pub fn cells(&self, row: &R) -> Vec<String> {
        self.columns.iter().map(|c| c.cell(row)).collect()
    }

    pub fn render(&self, rows: &[R]) -> String {
        let body: Vec<Vec<String>> = rows.iter().map(|row| self.cells(row)).collect();

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.header.chars().count()).collect();
        for cells in &body {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let headers: Vec<String> = self.headers().iter().map(|h| h.to_string()).collect();
        push_line(&mut out, &headers, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &rule, &widths);
        for cells in &body {
            push_line(&mut out, cells, &widths);
        }
        out
    }

    pub fn to_json(&self, rows: &[R]) -> Value {
        Value::Array(
            rows.iter()
                .map(|row| {
                    let object: Map<String, Value> = self
                        .columns
                        .iter()
                        .map(|c| (c.key.to_string(), Value::String(c.cell(row))))
                        .collect();
                    Value::Object(object)
                })
                .collect(),
        )
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

/// Empty string for `None`, display otherwise
pub fn opt<T: std::fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Row {
        name: &'static str,
        city: Option<&'static str>,
    }

    fn table() -> Table<Row> {
        Table::new()
            .column("name", "Nombre", |r: &Row| r.name.to_string())
            .column("city", "Ciudad", |r: &Row| opt(&r.city))
    }

    #[test]
    fn test_render_aligns_columns() {
        let rows = [
            Row { name: "Acme", city: Some("Málaga") },
            Row { name: "Distribuciones Sur", city: None },
        ];

        let text = table().render(&rows);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Nombre              Ciudad");
        assert_eq!(lines[1], "------------------  ------");
        assert_eq!(lines[2], "Acme                Málaga");
        assert_eq!(lines[3], "Distribuciones Sur");
    }

    #[test]
    fn test_json_rows_use_keys() {
        let rows = [Row { name: "Acme", city: None }];
        assert_eq!(table().to_json(&rows), json!([{"name": "Acme", "city": ""}]));
    }
}
