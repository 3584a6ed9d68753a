use std::fmt;

// MenuChoice is one of the numbered options offered by the console session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    RegisterPatron,
    BorrowBook,
    ReturnBook,
    ListBorrowed,
    AddPrintedBook,
    AddEBook,
    RemoveBook,
    LendBook,
    ListAvailable,
    Exit,
}

impl MenuChoice {
    pub fn number(&self) -> u32 {
        match self {
            MenuChoice::RegisterPatron => 1,
            MenuChoice::BorrowBook => 2,
            MenuChoice::ReturnBook => 3,
            MenuChoice::ListBorrowed => 4,
            MenuChoice::AddPrintedBook => 51,
            MenuChoice::AddEBook => 52,
            MenuChoice::RemoveBook => 6,
            MenuChoice::LendBook => 7,
            MenuChoice::ListAvailable => 8,
            MenuChoice::Exit => 9,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::RegisterPatron => "Register as a user",
            MenuChoice::BorrowBook => "Borrow a book",
            MenuChoice::ReturnBook => "Return a book",
            MenuChoice::ListBorrowed => "View borrowed books",
            MenuChoice::AddPrintedBook => "Add printed book to the library",
            MenuChoice::AddEBook => "Add e-book book to the library",
            MenuChoice::RemoveBook => "Remove a book from the library",
            MenuChoice::LendBook => "Lend a book to a user",
            MenuChoice::ListAvailable => "List available books in the library",
            MenuChoice::Exit => "Exit",
        }
    }

    // Options that only make sense for the registered patron.
    pub fn needs_patron(&self) -> bool {
        matches!(self, MenuChoice::BorrowBook | MenuChoice::ReturnBook |
            MenuChoice::ListBorrowed | MenuChoice::LendBook)
    }

    // Options listed in the menu, in display order.
    pub fn visible(registered: bool) -> Vec<MenuChoice> {
        let mut choices = if registered {
            vec![MenuChoice::BorrowBook, MenuChoice::ReturnBook, MenuChoice::ListBorrowed]
        } else {
            vec![MenuChoice::RegisterPatron]
        };
        choices.extend([MenuChoice::AddPrintedBook, MenuChoice::AddEBook, MenuChoice::RemoveBook,
            MenuChoice::LendBook, MenuChoice::ListAvailable, MenuChoice::Exit]);
        choices
    }
}

impl TryFrom<u32> for MenuChoice {
    type Error = u32;

    fn try_from(number: u32) -> Result<Self, Self::Error> {
        match number {
            1 => Ok(MenuChoice::RegisterPatron),
            2 => Ok(MenuChoice::BorrowBook),
            3 => Ok(MenuChoice::ReturnBook),
            4 => Ok(MenuChoice::ListBorrowed),
            51 => Ok(MenuChoice::AddPrintedBook),
            52 => Ok(MenuChoice::AddEBook),
            6 => Ok(MenuChoice::RemoveBook),
            7 => Ok(MenuChoice::LendBook),
            8 => Ok(MenuChoice::ListAvailable),
            9 => Ok(MenuChoice::Exit),
            other => Err(other),
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

#[cfg(test)]
mod tests {
    use crate::session::menu::MenuChoice;

    #[tokio::test]
    async fn test_should_parse_menu_numbers() {
        for choice in MenuChoice::visible(true).into_iter().chain(MenuChoice::visible(false)) {
            assert_eq!(Ok(choice), MenuChoice::try_from(choice.number()));
        }
        assert_eq!(Err(5), MenuChoice::try_from(5));
        assert_eq!(Err(0), MenuChoice::try_from(0));
    }

    #[tokio::test]
    async fn test_should_show_patron_options_once_registered() {
        let guest = MenuChoice::visible(false);
        assert_eq!(MenuChoice::RegisterPatron, guest[0]);
        assert!(!guest.contains(&MenuChoice::BorrowBook));
        assert!(guest.contains(&MenuChoice::LendBook));

        let member = MenuChoice::visible(true);
        assert!(!member.contains(&MenuChoice::RegisterPatron));
        assert_eq!(vec![MenuChoice::BorrowBook, MenuChoice::ReturnBook, MenuChoice::ListBorrowed], member[0..3].to_vec());
        assert_eq!(Some(&MenuChoice::Exit), member.last());
    }

    #[tokio::test]
    async fn test_should_render_menu_line() {
        assert_eq!("51. Add printed book to the library", MenuChoice::AddPrintedBook.to_string());
        assert!(MenuChoice::LendBook.needs_patron());
        assert!(!MenuChoice::RemoveBook.needs_patron());
    }
}
