mod create_category;
mod deactivate_category;
mod delete_category;
mod get_categories;
mod update_category;

pub use create_category::CreateCategoryUseCase;
pub use deactivate_category::DeactivateCategoryUseCase;
pub use delete_category::DeleteCategoryUseCase;
pub use get_categories::GetCategoriesUseCase;
pub use update_category::UpdateCategoryUseCase;
