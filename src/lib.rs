/// document: Tools for opening, editing and saving files
pub mod document;
/// row: Tools for inserting and removing bytes
pub mod row;
/// utils: Tools for handling text
pub mod utils;
/// event: Representation of events, errors and statuses
pub mod event;
/// io: Reading and writing line-delimited files
pub mod io;
/// navigate: Cursor movement
pub mod navigate;
/// token: Lexical classification for highlighting
pub mod token;
/// search: Finding and replacing text
pub mod search;
/// mode: Editor modes and input keys
pub mod mode;
/// config: Editor settings
pub mod config;
/// editor: The editing session
pub mod editor;
/// dispatch: The modal input state machine
pub mod dispatch;
/// command: The `:` command grammar
pub mod command;
