//! 表格导入（CSV / XLSX 上传解析）

use actix_multipart::Multipart;
use calamine::{Reader, Xlsx};
use futures_util::StreamExt;
use std::collections::HashMap;
use std::io::Cursor;

use crate::models::ErrorCode;

/// 导入解析错误
#[derive(Debug)]
pub enum ImportParseError {
    MissingColumn(String),
    ParseFailed(String),
    EmptyFile,
}

impl ImportParseError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingColumn(_) => ErrorCode::ImportFileMissingColumn,
            Self::ParseFailed(_) => ErrorCode::ImportFileParseFailed,
            Self::EmptyFile => ErrorCode::ImportFileDataInvalid,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::MissingColumn(col) => format!("缺少必需列: {col}"),
            Self::ParseFailed(msg) => msg.clone(),
            Self::EmptyFile => "文件中没有数据".to_string(),
        }
    }
}

/// 解析后的表格，列名统一为小写
#[derive(Debug, Default)]
pub struct ImportSheet {
    columns: HashMap<String, usize>,
    /// (文件中的行号, 单元格)，行号从 1 开始且包含表头
    pub rows: Vec<(usize, Vec<String>)>,
}

/// 一行数据的按列名访问视图
pub struct ImportRow<'a> {
    pub row_num: usize,
    cells: &'a [String],
    columns: &'a HashMap<String, usize>,
}

impl ImportRow<'_> {
    /// 取单元格，缺失列与空白都返回空串
    pub fn get(&self, column: &str) -> &str {
        self.columns
            .get(column)
            .and_then(|idx| self.cells.get(*idx))
            .map(|s| s.trim())
            .unwrap_or_default()
    }

    /// 取可选单元格，空白返回 `None`
    pub fn optional(&self, column: &str) -> Option<String> {
        Some(self.get(column))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

impl ImportSheet {
    fn from_header<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns = header
            .into_iter()
            .enumerate()
            .map(|(i, h)| (h.as_ref().trim().to_lowercase(), i))
            .collect();
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// 校验必需列是否齐全
    pub fn require_columns(&self, required: &[&str]) -> Result<(), ImportParseError> {
        match required.iter().find(|c| !self.columns.contains_key(**c)) {
            Some(missing) => Err(ImportParseError::MissingColumn(missing.to_string())),
            None => Ok(()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = ImportRow<'_>> {
        self.rows.iter().map(|(row_num, cells)| ImportRow {
            row_num: *row_num,
            cells,
            columns: &self.columns,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 从 multipart 中读取 `file` 字段
pub async fn read_file_from_multipart(
    payload: &mut Multipart,
) -> Result<(Vec<u8>, String), String> {
    let mut file_bytes = Vec::new();
    let mut file_name = String::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| format!("读取字段失败: {e}"))?;

        if field.name().map(|n| n == "file").unwrap_or(false) {
            if let Some(content_disposition) = field.content_disposition() {
                file_name = content_disposition
                    .get_filename()
                    .unwrap_or("upload.csv")
                    .to_string();
            }

            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|e| format!("读取数据失败: {e}"))?;
                file_bytes.extend_from_slice(&data);
            }
        }
    }

    if file_bytes.is_empty() {
        return Err("未找到文件字段".to_string());
    }

    Ok((file_bytes, file_name))
}

/// 按文件扩展名选择解析方式，完全空白的行会被跳过
pub fn parse_sheet(data: &[u8], file_name: &str) -> Result<ImportSheet, ImportParseError> {
    if file_name.to_lowercase().ends_with(".xlsx") {
        parse_xlsx(data)
    } else {
        parse_csv(data)
    }
}

fn parse_csv(data: &[u8]) -> Result<ImportSheet, ImportParseError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(Cursor::new(data));

    let headers = rdr
        .headers()
        .map_err(|e| ImportParseError::ParseFailed(format!("读取表头失败: {e}")))?;
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ImportParseError::EmptyFile);
    }
    let mut sheet = ImportSheet::from_header(headers.iter());

    for (i, result) in rdr.records().enumerate() {
        let row_num = i + 2;
        let record = result.map_err(|e| {
            ImportParseError::ParseFailed(format!("第 {row_num} 行解析失败: {e}"))
        })?;
        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }
        sheet.rows.push((row_num, cells));
    }

    Ok(sheet)
}

fn parse_xlsx(data: &[u8]) -> Result<ImportSheet, ImportParseError> {
    let cursor = Cursor::new(data);
    let mut workbook: Xlsx<_> = Xlsx::new(cursor)
        .map_err(|e| ImportParseError::ParseFailed(format!("打开 XLSX 失败: {e}")))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = sheet_names
        .first()
        .ok_or_else(|| ImportParseError::ParseFailed("工作簿中没有工作表".to_string()))?;

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| ImportParseError::ParseFailed(format!("读取工作表失败: {e}")))?;

    let mut rows_iter = range.rows();
    let header_row = rows_iter.next().ok_or(ImportParseError::EmptyFile)?;
    let mut sheet = ImportSheet::from_header(header_row.iter().map(|c| c.to_string()));

    for (i, row) in rows_iter.enumerate() {
        let cells: Vec<String> = row.iter().map(|c| c.to_string().trim().to_string()).collect();
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }
        sheet.rows.push((i + 2, cells));
    }

    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_case_insensitive_headers() {
        let data = b"Admission_No,First_Name\nADM001, Ada \n,\nADM002,Bola\n";
        let sheet = parse_sheet(data, "students.csv").unwrap();
        assert!(sheet.require_columns(&["admission_no", "first_name"]).is_ok());
        assert_eq!(sheet.len(), 2);

        let rows: Vec<_> = sheet.iter().collect();
        assert_eq!(rows[0].row_num, 2);
        assert_eq!(rows[0].get("first_name"), "Ada");
        // 空行被跳过但行号保持文件中的位置
        assert_eq!(rows[1].row_num, 4);
        assert_eq!(rows[1].optional("section"), None);
    }

    #[test]
    fn test_missing_column_reported() {
        let sheet = parse_sheet(b"admission_no\nADM001\n", "x.csv").unwrap();
        let err = sheet.require_columns(&["admission_no", "class_name"]).unwrap_err();
        assert_eq!(err.message(), "缺少必需列: class_name");
        assert_eq!(err.error_code(), ErrorCode::ImportFileMissingColumn);
    }
}
