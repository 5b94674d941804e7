//! Color theme for recipe summaries

use crate::infrastructure::kubernetes::resources::ServiceVisibility;
use comfy_table::Color as TableColor;

#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub success: TableColor,
    pub warning: TableColor,
    pub info: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            warning: TableColor::Yellow,
            info: TableColor::Cyan,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    /// Color for a recipe row based on how its workload is exposed
    pub fn get_visibility_color(&self, visibility: Option<ServiceVisibility>) -> TableColor {
        match visibility {
            None => self.success,
            Some(ServiceVisibility::External) => self.warning,
            Some(ServiceVisibility::Internal) => self.info,
        }
    }
}
