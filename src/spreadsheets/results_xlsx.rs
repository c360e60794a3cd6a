use crate::domain::types::EvaluatedProperty;
use crate::errors::ServerError;
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use rust_xlsxwriter::Workbook;

pub fn export_evaluated_xlsx(properties: &[EvaluatedProperty], search_id: &str) -> ResultResp {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    // Headers
    let headers = [
        "Address",
        "City",
        "State",
        "Zip",
        "Price",
        "Beds",
        "Baths",
        "Sqft",
        "Year Built",
        "Days on Market",
        "Zestimate",
        "AI Score",
        "Listing URL",
    ];

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    // Rows. Optional numerics stay blank rather than zero-filled.
    for (i, property) in properties.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_string(r, 0, &property.address)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write address: {}", e)))?;

        worksheet
            .write_string(r, 1, &property.city)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write city: {}", e)))?;

        worksheet
            .write_string(r, 2, &property.state)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write state: {}", e)))?;

        worksheet
            .write_string(r, 3, &property.zipcode)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write zip: {}", e)))?;

        worksheet
            .write_number(r, 4, property.price)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write price: {}", e)))?;

        worksheet
            .write_number(r, 5, property.beds)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write beds: {}", e)))?;

        worksheet
            .write_number(r, 6, property.baths)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write baths: {}", e)))?;

        if let Some(sqft) = property.sqft {
            worksheet
                .write_number(r, 7, sqft)
                .map_err(|e| ServerError::XlsxError(format!("Failed to write sqft: {}", e)))?;
        }

        if let Some(year_built) = property.year_built {
            worksheet
                .write_number(r, 8, year_built)
                .map_err(|e| ServerError::XlsxError(format!("Failed to write year built: {}", e)))?;
        }

        if let Some(days) = property.days_on_market {
            worksheet.write_number(r, 9, days).map_err(|e| {
                ServerError::XlsxError(format!("Failed to write days on market: {}", e))
            })?;
        }

        if let Some(zestimate) = property.zestimate {
            worksheet
                .write_number(r, 10, zestimate)
                .map_err(|e| ServerError::XlsxError(format!("Failed to write zestimate: {}", e)))?;
        }

        worksheet
            .write_number(r, 11, property.ai_score)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write score: {}", e)))?;

        let url = property.zillow_url.as_deref().unwrap_or("");
        worksheet
            .write_string(r, 12, url)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write url: {}", e)))?;
    }

    let buffer = workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))?;

    xlsx_response(buffer, &format!("properties_{search_id}.xlsx"))
}
