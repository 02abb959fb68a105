//! Server-rendered HTML pages.
//!
//! Every interpolated value goes through [`escape`].

use std::fmt::Write;

use axum::{http::StatusCode, response::Html};
use models::{Animal, AnimalFields, ValidationErrors};

use crate::routes::animals::LIST_PATH;

const STYLE: &str = "body{font-family:sans-serif;margin:2rem auto;max-width:48rem}\
table{border-collapse:collapse;width:100%}th,td{border:1px solid #ccc;padding:.4rem;text-align:left}\
label{display:block;margin-top:.8rem}.error{color:#b00020;margin:.2rem 0}";

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = escape(title),
    ))
}

fn text_input(out: &mut String, label: &str, name: &str, value: &str, errors: impl Iterator<Item = &'static str>) {
    let _ = write!(
        out,
        "<label for=\"{name}\">{label}</label>\n<input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{value}\">\n",
        label = escape(label),
        value = escape(value),
    );
    for msg in errors {
        let _ = writeln!(out, "<p class=\"error\">{}</p>", escape(msg));
    }
}

fn animal_inputs(out: &mut String, fields: &AnimalFields, errors: &ValidationErrors) {
    text_input(out, "Name", "name", &fields.name, errors.for_field("name"));
    text_input(out, "Breed", "breed", &fields.breed, errors.for_field("breed"));
    text_input(out, "Age", "age", &fields.age, errors.for_field("age"));
    text_input(out, "Type", "type", &fields.kind, errors.for_field("type"));
}

pub fn animal_list(animals: &[Animal]) -> Html<String> {
    let mut body = String::from("<h1>Animals</h1>\n<p><a href=\"/animals/create\">Add animal</a></p>\n");
    if animals.is_empty() {
        body.push_str("<p>No animals yet.</p>\n");
        return page("Animals", &body);
    }
    body.push_str("<table>\n<thead><tr><th>Name</th><th>Breed</th><th>Age</th><th>Type</th><th></th></tr></thead>\n<tbody>\n");
    for a in animals {
        let _ = writeln!(
            body,
            "<tr data-id=\"{id}\"><td>{name}</td><td>{breed}</td><td>{age}</td><td>{kind}</td>\
             <td><a href=\"/animals/update/{id}\">Edit</a> <a href=\"/animals/delete/{id}\">Delete</a></td></tr>",
            id = a.id,
            name = escape(&a.name),
            breed = escape(&a.breed),
            age = escape(&a.age),
            kind = escape(&a.kind),
        );
    }
    body.push_str("</tbody>\n</table>\n");
    page("Animals", &body)
}

/// Create form; `previous` refills the inputs after a rejected submission.
pub fn create_form(errors: &ValidationErrors, previous: Option<&AnimalFields>) -> Html<String> {
    let empty = AnimalFields::default();
    let fields = previous.unwrap_or(&empty);
    let mut body = String::from("<h1>Add animal</h1>\n<form method=\"POST\" action=\"/animals/create\">\n");
    animal_inputs(&mut body, fields, errors);
    let _ = write!(
        body,
        "<p><button type=\"submit\">Create</button> <a href=\"{LIST_PATH}\">Cancel</a></p>\n</form>"
    );
    page("Add animal", &body)
}

pub fn update_form(animal: &Animal) -> Html<String> {
    let mut body = format!(
        "<h1>Edit {name}</h1>\n<form method=\"POST\" action=\"/animals/update/{id}\">\n",
        name = escape(&animal.name),
        id = animal.id,
    );
    animal_inputs(&mut body, &animal.fields(), &ValidationErrors::new());
    let _ = write!(
        body,
        "<p><button type=\"submit\">Save</button> <a href=\"{LIST_PATH}\">Cancel</a></p>\n</form>"
    );
    page("Edit animal", &body)
}

pub fn delete_confirmation(animal: &Animal) -> Html<String> {
    let body = format!(
        "<h1>Delete animal</h1>\n<p>Are you sure you want to delete {name} ({breed}, {kind}, age {age})?</p>\n\
         <form method=\"POST\" action=\"/animals/delete/{id}\">\n\
         <p><button type=\"submit\">Delete</button> <a href=\"{LIST_PATH}\">Cancel</a></p>\n</form>",
        name = escape(&animal.name),
        breed = escape(&animal.breed),
        kind = escape(&animal.kind),
        age = escape(&animal.age),
        id = animal.id,
    );
    page("Delete animal", &body)
}

pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let reason = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<h1>{code} {reason}</h1>\n<p>{message}</p>\n<p><a href=\"{LIST_PATH}\">Back to animals</a></p>",
        code = status.as_u16(),
        reason = escape(reason),
        message = escape(message),
    );
    page(reason, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{validate_new_animal, AnimalId};

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(escape(r#"<a href="x">&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#x27;&lt;/a&gt;");
        assert_eq!(escape("Rex"), "Rex");
    }

    #[test]
    fn list_renders_rows_and_links() {
        let a = Animal::from_fields(AnimalId::generate(), AnimalFields::new("Rexy", "Lab<rador>", "3", "Dog"));
        let Html(html) = animal_list(std::slice::from_ref(&a));
        assert!(html.contains(&format!("/animals/update/{}", a.id)));
        assert!(html.contains(&format!("/animals/delete/{}", a.id)));
        assert!(html.contains("Lab&lt;rador&gt;"));
        assert!(!html.contains("Lab<rador>"));
    }

    #[test]
    fn empty_list_says_so() {
        let Html(html) = animal_list(&[]);
        assert!(html.contains("No animals yet."));
    }

    #[test]
    fn rejected_create_form_keeps_values_and_messages() {
        let submitted = AnimalFields::new("ab", "Labrador", "2.5", "Dog");
        let errors = validate_new_animal(&submitted);
        let Html(html) = create_form(&errors, Some(&submitted));
        assert!(html.contains("value=\"ab\""));
        assert!(html.contains("value=\"2.5\""));
        assert!(html.contains("Please ensure that name has more than 3 characters"));
        assert!(html.contains("Please ensure that age is a number"));
        assert!(!html.contains("Please ensure breed is more than 3 characters"));
    }

    #[test]
    fn empty_create_form_has_no_errors() {
        let Html(html) = create_form(&ValidationErrors::new(), None);
        assert!(!html.contains("class=\"error\""));
        assert!(html.contains("name=\"type\""));
    }

    #[test]
    fn update_form_is_prefilled() {
        let a = Animal::from_fields(AnimalId::generate(), AnimalFields::new("Rexy", "Labrador", "3", "Dog"));
        let Html(html) = update_form(&a);
        assert!(html.contains(&format!("action=\"/animals/update/{}\"", a.id)));
        assert!(html.contains("value=\"Labrador\""));
        assert!(html.contains("value=\"Dog\""));
    }

    #[test]
    fn error_page_shows_status() {
        let Html(html) = error_page(StatusCode::NOT_FOUND, "Animal not found");
        assert!(html.contains("404 Not Found"));
        assert!(html.contains("Animal not found"));
    }
}
