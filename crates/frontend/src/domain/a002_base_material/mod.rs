pub mod api;
pub mod ui;

use crate::shared::selection::Keyed;
use contracts::domain::a002_base_material::BaseMaterialDto;

impl Keyed for BaseMaterialDto {
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }
}
