pub mod card_grid;
pub mod dex_header;
pub mod dex_view;
pub mod search_bar;
pub mod theme;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use card_grid::{CardGrid, CardGridProps};
pub use dex_header::{DexHeader, DexHeaderProps};
pub use dex_view::{DexView, DexViewProps};
pub use search_bar::{SearchBar, SearchBarProps};
