use std::io::{BufRead, Write};
use tracing::{debug, info};
use crate::books::domain::model::BookFormat;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
use crate::catalog::command::list_available_cmd::{ListAvailableBooksCommand, ListAvailableBooksCommandRequest};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
use crate::catalog::factory::create_catalog_service;
use crate::checkout::command::checkout_book_cmd::{CheckoutBookCommand, CheckoutBookCommandRequest};
use crate::checkout::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest};
use crate::checkout::factory::create_checkout_service;
use crate::core::command::Command;
use crate::core::controller::{AppState, log_command_error};
use crate::core::library::LibraryResult;
use crate::patrons::command::add_patron_cmd::{AddPatronCommand, AddPatronCommandRequest};
use crate::patrons::command::get_patron_cmd::{GetPatronCommand, GetPatronCommandRequest};
use crate::patrons::factory::create_patron_service;
use crate::session::console::Console;
use crate::session::menu::MenuChoice;

pub const TITLE: &str = "Library Management System";
pub const GOODBYE: &str = "Thank you for using the Library Management System!";
pub const INVALID_CHOICE: &str = "Invalid choice. Please try again.";
pub const REGISTER_FIRST: &str = "Please register as a user first.";
pub const BOOK_NOT_AVAILABLE: &str = "Book not available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

// LibrarySession runs the interactive menu against one AppState and at most one registered patron.
#[derive(Debug)]
pub struct LibrarySession {
    state: AppState,
    patron_id: Option<String>,
}

impl LibrarySession {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            patron_id: None,
        }
    }

    pub fn patron_id(&self) -> Option<&str> {
        self.patron_id.as_deref()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    // Runs until the user exits or input ends. Only console failures are returned as errors.
    pub async fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> LibraryResult<()> {
        info!(branch_id = self.state.config.branch_id.as_str(), "session started");
        loop {
            self.show_menu(console)?;
            let Some(number) = console.ask_number::<u32>("Enter your choice: ")? else {
                break;
            };
            let flow = match MenuChoice::try_from(number) {
                Ok(choice) => self.dispatch(choice, console).await?,
                Err(unknown) => {
                    debug!(choice = unknown, "unknown menu choice");
                    console.say(INVALID_CHOICE)?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                break;
            }
        }
        info!("session ended");
        Ok(())
    }

    fn show_menu<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> LibraryResult<()> {
        console.say("")?;
        console.say(TITLE)?;
        for choice in MenuChoice::visible(self.patron_id.is_some()) {
            console.say(choice.to_string().as_str())?;
        }
        Ok(())
    }

    async fn dispatch<R: BufRead, W: Write>(&mut self, choice: MenuChoice,
                                            console: &mut Console<R, W>) -> LibraryResult<Flow> {
        let patron_id = match (choice.needs_patron(), self.patron_id.clone()) {
            (true, None) => {
                console.say(REGISTER_FIRST)?;
                return Ok(Flow::Continue);
            }
            (_, patron_id) => patron_id.unwrap_or_default(),
        };
        match choice {
            MenuChoice::RegisterPatron => self.register(console).await,
            MenuChoice::BorrowBook => {
                self.checkout(console, patron_id.as_str(), "Enter book ISBN to borrow: ", "Book borrowed successfully!").await
            }
            MenuChoice::LendBook => {
                self.checkout(console, patron_id.as_str(), "Enter book ISBN to lend: ", "Book lent successfully!").await
            }
            MenuChoice::ReturnBook => self.return_book(console, patron_id.as_str()).await,
            MenuChoice::ListBorrowed => self.list_borrowed(console, patron_id.as_str()).await,
            MenuChoice::AddPrintedBook => self.add_printed_book(console).await,
            MenuChoice::AddEBook => self.add_ebook(console).await,
            MenuChoice::RemoveBook => self.remove_book(console).await,
            MenuChoice::ListAvailable => self.list_available(console).await,
            MenuChoice::Exit => {
                console.say(GOODBYE)?;
                Ok(Flow::Exit)
            }
        }
    }

    async fn register<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> LibraryResult<Flow> {
        if self.patron_id.is_some() {
            console.say("User already registered.")?;
            return Ok(Flow::Continue);
        }
        let Some(name) = console.ask("Enter your name: ")? else {
            return Ok(Flow::Exit);
        };
        let cmd = AddPatronCommand::new(create_patron_service(&self.state.config, &self.state.store));
        match cmd.execute(AddPatronCommandRequest::new(name.as_str())).await {
            Ok(res) => {
                self.patron_id = Some(res.patron.patron_id);
                console.say("User registered successfully!")?;
            }
            Err(err) => {
                log_command_error("register", &err);
                console.say("User could not be registered.")?;
            }
        }
        Ok(Flow::Continue)
    }

    async fn checkout<R: BufRead, W: Write>(&self, console: &mut Console<R, W>, patron_id: &str,
                                            prompt: &str, success: &str) -> LibraryResult<Flow> {
        let Some(isbn) = console.ask(prompt)? else {
            return Ok(Flow::Exit);
        };
        let cmd = CheckoutBookCommand::new(create_checkout_service(&self.state.config, &self.state.store));
        match cmd.execute(CheckoutBookCommandRequest::new(patron_id, isbn.as_str())).await {
            Ok(_) => console.say(success)?,
            Err(err) => {
                log_command_error("checkout", &err);
                console.say(BOOK_NOT_AVAILABLE)?;
            }
        }
        Ok(Flow::Continue)
    }

    async fn return_book<R: BufRead, W: Write>(&self, console: &mut Console<R, W>,
                                               patron_id: &str) -> LibraryResult<Flow> {
        let Some(isbn) = console.ask("Enter book ISBN to return: ")? else {
            return Ok(Flow::Exit);
        };
        let cmd = ReturnBookCommand::new(create_checkout_service(&self.state.config, &self.state.store));
        match cmd.execute(ReturnBookCommandRequest::new(patron_id, isbn.as_str())).await {
            Ok(_) => console.say("Book returned successfully!")?,
            Err(err) => {
                log_command_error("return", &err);
                console.say("Book not found or not borrowed by you.")?;
            }
        }
        Ok(Flow::Continue)
    }

    async fn list_borrowed<R: BufRead, W: Write>(&self, console: &mut Console<R, W>,
                                                 patron_id: &str) -> LibraryResult<Flow> {
        let cmd = GetPatronCommand::new(create_patron_service(&self.state.config, &self.state.store));
        match cmd.execute(GetPatronCommandRequest::new(patron_id)).await {
            Ok(res) => {
                console.say(format!("{} has borrowed the following books:", res.patron.name).as_str())?;
                for book in res.borrowed {
                    console.say(book.describe().as_str())?;
                }
            }
            Err(err) => {
                log_command_error("list_borrowed", &err);
                console.say(REGISTER_FIRST)?;
            }
        }
        Ok(Flow::Continue)
    }

    // title, author and isbn; None once input ends
    fn ask_book_fields<R: BufRead, W: Write>(console: &mut Console<R, W>)
                                             -> LibraryResult<Option<(String, String, String)>> {
        let Some(title) = console.ask("Enter book title: ")? else {
            return Ok(None);
        };
        let Some(author) = console.ask("Enter book author: ")? else {
            return Ok(None);
        };
        let Some(isbn) = console.ask("Enter book ISBN: ")? else {
            return Ok(None);
        };
        Ok(Some((title, author, isbn)))
    }

    async fn add_printed_book<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> LibraryResult<Flow> {
        let Some((title, author, isbn)) = Self::ask_book_fields(console)? else {
            return Ok(Flow::Exit);
        };
        let Some(pages) = console.ask_number::<u32>("Enter number of pages: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(cover) = console.ask("Enter cover type (e.g., hardcover, paperback): ")? else {
            return Ok(Flow::Exit);
        };
        let format = BookFormat::printed(pages, cover.as_str());
        self.add_book(console, AddBookCommandRequest::new(title.as_str(), author.as_str(), isbn.as_str(), format),
                      "Printed book added successfully!").await
    }

    async fn add_ebook<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> LibraryResult<Flow> {
        let Some((title, author, isbn)) = Self::ask_book_fields(console)? else {
            return Ok(Flow::Exit);
        };
        let Some(size) = console.ask_number_where::<f64, _>("Enter file size (in MB): ",
                                                            |s| s.is_finite() && *s >= 0.0)? else {
            return Ok(Flow::Exit);
        };
        let Some(file_format) = console.ask("Enter file format (e.g., PDF, EPUB): ")? else {
            return Ok(Flow::Exit);
        };
        let format = BookFormat::electronic(size, file_format.as_str());
        self.add_book(console, AddBookCommandRequest::new(title.as_str(), author.as_str(), isbn.as_str(), format),
                      "E-Book added successfully!").await
    }

    async fn add_book<R: BufRead, W: Write>(&self, console: &mut Console<R, W>, req: AddBookCommandRequest,
                                            success: &str) -> LibraryResult<Flow> {
        let cmd = AddBookCommand::new(create_catalog_service(&self.state.config, &self.state.store));
        match cmd.execute(req).await {
            Ok(_) => console.say(success)?,
            Err(err) => {
                log_command_error("add_book", &err);
                console.say("Book could not be added.")?;
            }
        }
        Ok(Flow::Continue)
    }

    async fn remove_book<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> LibraryResult<Flow> {
        let Some(isbn) = console.ask("Enter book ISBN to remove: ")? else {
            return Ok(Flow::Exit);
        };
        let cmd = RemoveBookCommand::new(create_catalog_service(&self.state.config, &self.state.store));
        match cmd.execute(RemoveBookCommandRequest::new(isbn.as_str())).await {
            Ok(_) => console.say("Book removed successfully!")?,
            Err(err) => {
                log_command_error("remove_book", &err);
                console.say("Book not found.")?;
            }
        }
        Ok(Flow::Continue)
    }

    async fn list_available<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> LibraryResult<Flow> {
        let cmd = ListAvailableBooksCommand::new(create_catalog_service(&self.state.config, &self.state.store));
        match cmd.execute(ListAvailableBooksCommandRequest::default()).await {
            Ok(res) => {
                console.say("Available Books:")?;
                for book in res.books {
                    console.say(book.describe().as_str())?;
                }
            }
            Err(err) => {
                log_command_error("list_available", &err);
                console.say("Available books could not be listed.")?;
            }
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use crate::catalog::factory::create_catalog_service;
    use crate::core::controller::AppState;
    use crate::core::domain::Configuration;
    use crate::patrons::domain::Patron;
    use crate::patrons::factory::create_patron_service;
    use crate::session::console::{Console, INVALID_NUMBER};
    use crate::session::controller::{BOOK_NOT_AVAILABLE, GOODBYE, INVALID_CHOICE, LibrarySession, REGISTER_FIRST};

    async fn run_script(session: &mut LibrarySession, script: &str) -> String {
        let mut console = Console::new(Cursor::new(script.as_bytes().to_vec()), vec![]);
        session.run(&mut console).await.expect("should run session");
        String::from_utf8(console.into_inner().1).expect("should be utf8")
    }

    fn new_session() -> LibrarySession {
        LibrarySession::new(AppState::new(Configuration::new("test")))
    }

    #[tokio::test]
    async fn test_should_exit_with_goodbye() {
        let mut session = new_session();
        let out = run_script(&mut session, "9\n").await;
        assert!(out.contains("Library Management System\n1. Register as a user\n51."));
        assert!(out.contains("Enter your choice: "));
        assert!(out.ends_with(&format!("{}\n", GOODBYE)));
    }

    #[tokio::test]
    async fn test_should_stop_at_end_of_input() {
        let mut session = new_session();
        let out = run_script(&mut session, "8\n").await;
        assert!(out.contains("Available Books:"));
        assert!(!out.contains(GOODBYE));

        let out = run_script(&mut session, "51\nT1\nA1\n").await;
        assert!(!out.contains("Printed book added successfully!"));
    }

    #[tokio::test]
    async fn test_should_reject_unknown_and_malformed_choices() {
        let mut session = new_session();
        let out = run_script(&mut session, "5\nabc\n9\n").await;
        assert!(out.contains(INVALID_CHOICE));
        assert!(out.contains(INVALID_NUMBER));
        assert!(out.contains(GOODBYE));
    }

    #[tokio::test]
    async fn test_should_recover_from_non_utf8_input() {
        let mut session = new_session();
        let mut console = Console::new(Cursor::new(b"\xff\xfe\n9\n".to_vec()), vec![]);
        session.run(&mut console).await.expect("should run session");
        let out = String::from_utf8(console.into_inner().1).expect("should be utf8");
        assert!(out.contains(INVALID_NUMBER));
        assert!(out.ends_with(&format!("{}\n", GOODBYE)));
    }

    #[tokio::test]
    async fn test_should_require_registration() {
        let mut session = new_session();
        let out = run_script(&mut session, "2\n3\n4\n7\n9\n").await;
        assert_eq!(4, out.matches(REGISTER_FIRST).count());
        assert!(session.patron_id().is_none());
    }

    #[tokio::test]
    async fn test_should_register_once() {
        let mut session = new_session();
        let out = run_script(&mut session, "1\nAlice\n1\n9\n").await;
        assert!(out.contains("User registered successfully!"));
        assert!(out.contains("User already registered."));
        assert!(out.contains("2. Borrow a book\n3. Return a book\n4. View borrowed books\n51."));

        let patron_id = session.patron_id().expect("should have patron").to_string();
        let patron_svc = create_patron_service(&session.state().config, &session.state().store);
        let patron = patron_svc.find_patron_by_id(patron_id.as_str()).await.expect("should load patron");
        assert_eq!("Alice", patron.name());
    }

    #[tokio::test]
    async fn test_should_add_lend_and_return_books() {
        let mut session = new_session();
        let script = "51\nT1\nA1\n1234\nmany\n100\nhardcover\n\
                      52\nT2\nA2\n5678\n2\nPDF\n\
                      1\nAlice\n\
                      2\n1234\n\
                      8\n\
                      4\n\
                      7\n1234\n\
                      3\n1234\n\
                      3\n1234\n\
                      9\n";
        let out = run_script(&mut session, script).await;
        assert!(out.contains("Printed book added successfully!"));
        assert!(out.contains(INVALID_NUMBER));
        assert!(out.contains("E-Book added successfully!"));
        assert!(out.contains("Book borrowed successfully!"));
        assert!(out.contains("Available Books:\nIs lent: no, Title: T2, Author: A2, ISBN: 5678, File Size: 2.0MB, File Format: PDF\n"));
        assert!(out.contains("Alice has borrowed the following books:\n\
                              Is lent: yes, Title: T1, Author: A1, ISBN: 1234, Number of Pages: 100, Cover Type: hardcover\n"));
        assert!(out.contains(BOOK_NOT_AVAILABLE));
        assert!(out.contains("Book returned successfully!"));
        assert!(out.contains("Book not found or not borrowed by you."));

        let catalog_svc = create_catalog_service(&session.state().config, &session.state().store);
        assert_eq!(2, catalog_svc.list_available().await.expect("should list").len());
    }

    #[tokio::test]
    async fn test_should_lend_book_to_patron() {
        let mut session = new_session();
        let out = run_script(&mut session, "51\nT1\nA1\n1234\n100\nhardcover\n1\nBob\n7\n1234\n7\n9999\n4\n9\n").await;
        assert!(out.contains("Book lent successfully!"));
        assert!(out.contains(BOOK_NOT_AVAILABLE));
        assert!(out.contains("Bob has borrowed the following books:\nIs lent: yes, Title: T1"));
    }

    #[tokio::test]
    async fn test_should_remove_books() {
        let mut session = new_session();
        let out = run_script(&mut session, "52\nT2\nA2\n5678\n1.5\nEPUB\n6\n5678\n6\n5678\n8\n9\n").await;
        assert!(out.contains("Book removed successfully!"));
        assert!(out.contains("Book not found."));
        assert!(!out.contains("ISBN: 5678, File Size: 1.5MB"));
    }

    #[tokio::test]
    async fn test_should_list_removed_book_still_borrowed() {
        let mut session = new_session();
        let out = run_script(&mut session, "51\nT1\nA1\n1234\n100\nhardcover\n1\nAlice\n2\n1234\n6\n1234\n4\n8\n9\n").await;
        assert!(out.contains("Book removed successfully!"));
        assert!(out.contains("Alice has borrowed the following books:\n\
                              Is lent: yes, Title: T1, Author: A1, ISBN: 1234, Number of Pages: 100, Cover Type: hardcover\n"));
        assert!(out.contains("Available Books:\n\nLibrary Management System"));

        let patron_svc = create_patron_service(&session.state().config, &session.state().store);
        let patron = patron_svc.find_patron_by_id(session.patron_id().expect("should have patron"))
            .await.expect("should load patron");
        assert_eq!(1, patron.borrowed_count());
    }
}
