pub mod a001_project;
pub mod a002_base_material;
