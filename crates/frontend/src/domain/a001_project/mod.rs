pub mod api;
pub mod ui;

use crate::shared::selection::Keyed;
use contracts::domain::a001_project::ProjectDto;

impl Keyed for ProjectDto {
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }
}
