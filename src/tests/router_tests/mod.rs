mod convert_tests;
mod page_tests;
