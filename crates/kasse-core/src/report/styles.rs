use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern};

pub const CURRENCY_FORMAT: &str = "#,##0.00 €";
pub const CATEGORY_FILL: u32 = 0xDCDCDC;
const FONT: &str = "Calibri";

/// Cell formats shared by the overview and detail sheets.
pub struct Styles {
    pub title: Format,
    /// Product column heading.
    pub header: Format,
    /// Price and total column headings.
    pub header_strong: Format,
    /// Location column headings on the overview.
    pub header_centered: Format,
    pub overview_category: Format,
    pub detail_category: Format,
    pub cell: Format,
    pub currency: Format,
    pub total: Format,
}

impl Styles {
    pub fn new() -> Self {
        let header = Format::new()
            .set_font_name(FONT)
            .set_font_size(12)
            .set_italic()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::VerticalCenter);

        Self {
            title: Format::new().set_font_name(FONT).set_font_size(16).set_bold(),
            header_strong: header
                .clone()
                .set_bold()
                .set_align(FormatAlign::Center),
            header_centered: header.clone().set_align(FormatAlign::Center),
            header,
            overview_category: category(14),
            detail_category: category(11),
            cell: Format::new().set_border(FormatBorder::Thin),
            currency: Format::new()
                .set_border(FormatBorder::Thin)
                .set_num_format(CURRENCY_FORMAT),
            total: Format::new().set_border(FormatBorder::Thin).set_bold(),
        }
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::new()
    }
}

fn category(size: u8) -> Format {
    Format::new()
        .set_font_name(FONT)
        .set_font_size(size)
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_background_color(Color::RGB(CATEGORY_FILL))
        .set_pattern(FormatPattern::Solid)
}
