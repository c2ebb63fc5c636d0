use crate::place::PlaceResult;
use tracing::debug;

/// Column names of the exported table, in output order.
pub const HEADER: &str = "name, phone, url, thoroughfare, subThoroughfare, locality, subLocality, administrativeArea, subAdministrativeArea, postalCode, isoCountryCode, country, latitude, longitude";

const SEPARATOR: &str = ", ";

/// Renders the header followed by one line per place.
///
/// Absent fields become empty cells. Cell contents are not escaped, so a
/// value containing the separator shifts the columns of its row.
pub fn format_places<'a, I>(places: I) -> String
where
    I: IntoIterator<Item = &'a PlaceResult>,
{
    let mut table = String::from(HEADER);
    let mut rows = 0;
    for place in places {
        table.push('\n');
        table.push_str(&format_row(place));
        rows += 1;
    }
    debug!("Formatted {} place rows", rows);
    table
}

fn format_row(place: &PlaceResult) -> String {
    let address = &place.address;
    let text_cells = [
        &place.name,
        &place.phone,
        &place.url,
        &address.thoroughfare,
        &address.sub_thoroughfare,
        &address.locality,
        &address.sub_locality,
        &address.administrative_area,
        &address.sub_administrative_area,
        &address.postal_code,
        &address.iso_country_code,
        &address.country,
    ];

    let mut cells: Vec<String> = text_cells
        .iter()
        .map(|cell| cell.as_deref().unwrap_or_default().to_string())
        .collect();
    cells.push(place.coordinate.latitude.to_string());
    cells.push(place.coordinate.longitude.to_string());
    cells.join(SEPARATOR)
}
