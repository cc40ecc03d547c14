pub mod example_card;
pub mod intro_card;
pub mod kanji_grid;
pub mod menu;
pub mod progress_bar;
pub mod quiz_card;
