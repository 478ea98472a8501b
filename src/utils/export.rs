//! 表格导出（CSV / XLSX）
//!
//! 各业务模块把记录转换为 [`Table`]，由这里统一渲染并构造下载响应。

use actix_web::{HttpResponse, http::header};
use rust_xlsxwriter::{Format, Workbook};

use crate::errors::Result;
use crate::models::ExportFormat;

/// 单元格
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Empty)
    }
}

impl Cell {
    fn as_csv_field(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

/// 待导出的表格：一行表头加若干数据行
#[derive(Debug, Clone)]
pub struct Table {
    sheet_name: String,
    headers: Vec<&'static str>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(sheet_name: impl Into<String>, headers: Vec<&'static str>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 渲染为 CSV（UTF-8，RFC 4180 引号规则）
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row.iter().map(Cell::as_csv_field))?;
        }
        wtr.into_inner()
            .map_err(|e| crate::errors::SchoolAdminError::export(format!("CSV 生成失败: {e}")))
    }

    /// 渲染为 XLSX，表头加粗，金额写为数字单元格
    pub fn to_xlsx(&self) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        let header_format = Format::new().set_bold();
        for (col, header) in self.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        for (i, row) in self.rows.iter().enumerate() {
            let row_idx = (i + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                let col = col as u16;
                match cell {
                    Cell::Text(s) => {
                        worksheet.write_string(row_idx, col, s)?;
                    }
                    Cell::Number(n) => {
                        worksheet.write_number(row_idx, col, *n)?;
                    }
                    Cell::Empty => {}
                }
            }
        }

        Ok(workbook.save_to_buffer()?)
    }

    pub fn render(&self, format: ExportFormat) -> Result<Vec<u8>> {
        match format {
            ExportFormat::Csv => self.to_csv(),
            ExportFormat::Xlsx => self.to_xlsx(),
        }
    }
}

/// 构造附件下载响应
pub fn attachment_response(format: ExportFormat, stem: &str, body: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(format.content_type())
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{stem}.{}\"", format.extension()),
        ))
        .body(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table(records: usize) -> Table {
        let mut table = Table::new("Fees", vec!["Admission No", "Student", "Amount"]);
        for i in 0..records {
            table.push_row(vec![
                format!("ADM{i:03}").into(),
                "Doe, Jane \"JJ\"".into(),
                (1500.5 + i as f64).into(),
            ]);
        }
        table
    }

    #[test]
    fn test_csv_has_one_row_per_record() {
        let table = sample_table(7);
        let bytes = table.to_csv().unwrap();
        let mut rdr = csv::Reader::from_reader(bytes.as_slice());
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(headers.len(), 3);
        let rows: Vec<_> = rdr.records().collect::<std::result::Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 7);
        // 含逗号和引号的字段原样往返
        assert_eq!(&rows[0][1], "Doe, Jane \"JJ\"");
        assert_eq!(&rows[0][2], "1500.5");
    }

    #[test]
    fn test_empty_export_keeps_header() {
        let bytes = sample_table(0).to_csv().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("Admission No,Student,Amount"));
    }

    #[test]
    fn test_xlsx_renders() {
        let bytes = sample_table(2).render(ExportFormat::Xlsx).unwrap();
        // XLSX 为 zip 容器
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_attachment_headers() {
        let resp = attachment_response(ExportFormat::Csv, "students", b"a,b\n".to_vec());
        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap();
        assert_eq!(disposition, "attachment; filename=\"students.csv\"");
    }
}
