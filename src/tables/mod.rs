mod students;

pub use students::{
    StudentsBirthday, StudentsColumns, StudentsFirstName, StudentsId, StudentsLastName,
    StudentsTable,
};
