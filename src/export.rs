//! Excel Export
//!
//! Builds a guest sheet from the visible columns of the current rows and
//! writes it as `.xlsx`.

use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, XlsxError};

use crate::models::GuestRow;
use crate::text::yes_no;
use crate::view_config::GuestColumn;

pub const EXPORT_FILE_NAME: &str = "invitados.xlsx";
const SHEET_NAME: &str = "Invitados";
const MIN_COLUMN_WIDTH: usize = 10;
const MAX_COLUMN_WIDTH: usize = 60;
/// Time the browser gets to start reading the blob before its URL is freed
const REVOKE_DELAY_MILLIS: u32 = 1_000;

/// Plain-text sheet ready to be rendered
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub widths: Vec<usize>,
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

pub fn cell_text(row: &GuestRow, column: GuestColumn) -> String {
    match column {
        GuestColumn::FullName => {
            if row.is_main_guest {
                row.full_name.clone()
            } else {
                format!("{} (acompañante)", row.full_name)
            }
        }
        GuestColumn::Phone => row.phone.clone().unwrap_or_default(),
        GuestColumn::Email => row.email.clone().unwrap_or_default(),
        GuestColumn::Menu => row.menu.clone(),
        GuestColumn::Allergies => join_names(row.allergies.iter().map(|a| a.name.as_str())),
        GuestColumn::Tags => join_names(row.tags.iter().map(|t| t.name.as_str())),
        GuestColumn::Validated => yes_no(row.validated).to_string(),
        GuestColumn::AccommodationPlan => row.accommodation_plan.clone().unwrap_or_default(),
        GuestColumn::NeedsHotel => yes_no(row.needs_hotel).to_string(),
        GuestColumn::NeedsTransport => yes_no(row.needs_transport).to_string(),
        GuestColumn::NeedsTransportBack => yes_no(row.needs_transport_back).to_string(),
        GuestColumn::Disability => yes_no(row.disability).to_string(),
        GuestColumn::Observations => row.observations.clone().unwrap_or_default(),
    }
}

/// Longest text in the column plus padding, clamped
fn column_width<'a>(texts: impl Iterator<Item = &'a String>) -> usize {
    let longest = texts.map(|t| t.chars().count()).max().unwrap_or(0);
    (longest + 2).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
}

pub fn build_sheet(rows: &[GuestRow], columns: &[GuestColumn]) -> ExportSheet {
    let headers: Vec<String> = columns.iter().map(|c| c.header().to_string()).collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|c| cell_text(row, *c)).collect())
        .collect();
    let widths = (0..columns.len())
        .map(|i| column_width(std::iter::once(&headers[i]).chain(cells.iter().map(|r| &r[i]))))
        .collect();

    ExportSheet { headers, rows: cells, widths }
}

/// Render the sheet: bold filled header, thin borders on every data cell
pub fn write_xlsx(sheet: &ExportSheet) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x8E6C88))
        .set_border(FormatBorder::Thin);
    let cell_format = Format::new().set_border(FormatBorder::Thin);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in sheet.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }
    for (row_idx, row) in sheet.rows.iter().enumerate() {
        for (col, text) in row.iter().enumerate() {
            worksheet.write_string_with_format(row_idx as u32 + 1, col as u16, text, &cell_format)?;
        }
    }
    for (col, width) in sheet.widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width as f64)?;
    }

    workbook.save_to_buffer()
}

/// Hand the bytes to the browser as a file download
pub fn download(bytes: &[u8], file_name: &str) -> Result<(), String> {
    use wasm_bindgen::JsCast;

    let js_err = |e: wasm_bindgen::JsValue| format!("{:?}", e);
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("document unavailable")?;
    let anchor = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "anchor cast failed".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    // The download starts asynchronously; the URL must outlive this call
    gloo_timers::callback::Timeout::new(REVOKE_DELAY_MILLIS, move || {
        if let Err(e) = web_sys::Url::revoke_object_url(&url) {
            log::warn!("[EXPORT] Failed to revoke download URL: {:?}", e);
        }
    })
    .forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NamedRef;

    fn make_row(id: u32, full_name: &str, is_main_guest: bool) -> GuestRow {
        GuestRow {
            id,
            full_name: full_name.to_string(),
            is_main_guest,
            parent_id: if is_main_guest { None } else { Some(1) },
            menu: "Vegano".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_sheet_headers_and_cells() {
        let mut ana = make_row(1, "Ana", true);
        ana.needs_hotel = true;
        ana.tags = vec![NamedRef { id: 1, name: "VIP".to_string() }, NamedRef { id: 2, name: "Familia".to_string() }];
        let bob = make_row(10, "Bob", false);
        let columns = [GuestColumn::FullName, GuestColumn::NeedsHotel, GuestColumn::Tags];

        let sheet = build_sheet(&[ana, bob], &columns);
        assert_eq!(sheet.headers, vec!["Nombre", "Hotel", "Etiquetas"]);
        assert_eq!(sheet.rows[0], vec!["Ana", "Sí", "VIP, Familia"]);
        assert_eq!(sheet.rows[1], vec!["Bob (acompañante)", "No", ""]);
    }

    #[test]
    fn test_widths_clamped() {
        let mut ana = make_row(1, "Ana", true);
        ana.observations = Some("x".repeat(200));
        let columns = [GuestColumn::Menu, GuestColumn::Observations, GuestColumn::Email];

        let sheet = build_sheet(&[ana], &columns);
        assert_eq!(sheet.widths, vec![MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH, MIN_COLUMN_WIDTH]);
    }

    #[test]
    fn test_width_counts_characters() {
        let mut ana = make_row(1, "Ana", true);
        ana.accommodation_plan = Some("Habitación doble en el Hotel Ñandú".to_string());

        let sheet = build_sheet(&[ana], &[GuestColumn::AccommodationPlan]);
        assert_eq!(sheet.widths, vec![34 + 2]);
    }

    #[test]
    fn test_write_xlsx_produces_zip() {
        let sheet = build_sheet(&[make_row(1, "Ana", true)], &[GuestColumn::FullName, GuestColumn::Menu]);
        let bytes = write_xlsx(&sheet).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_download_url_outlives_click() {
        assert!(REVOKE_DELAY_MILLIS >= 500);
    }
}
