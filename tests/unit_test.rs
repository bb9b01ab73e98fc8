// Unit tests for usrapi-manager
// These tests work with the public API of each building block in isolation.

#[cfg(test)]
mod http_client_tests {
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    use usrapi_manager::api::{CollectionClient, HttpCollectionClient, Operation, User};

    struct Captured {
        method: String,
        path: String,
        body: String,
    }

    // Serve exactly one request with a canned response and report what was received.
    fn serve_once(status: &str, body: &str) -> (String, JoinHandle<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        let status = status.to_string();
        let body = body.to_string();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("request line");
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).expect("header line");
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':')
                    && name.eq_ignore_ascii_case("content-length")
                {
                    content_length = value.trim().parse().expect("content-length");
                }
            }
            let mut received = vec![0u8; content_length];
            reader.read_exact(&mut received).expect("body");

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).expect("write response");
            stream.flush().expect("flush");

            let mut parts = request_line.split_whitespace();
            Captured {
                method: parts.next().unwrap_or_default().to_string(),
                path: parts.next().unwrap_or_default().to_string(),
                body: String::from_utf8(received).expect("utf8 body"),
            }
        });
        (format!("http://{addr}"), handle)
    }

    fn client(base: &str) -> HttpCollectionClient {
        HttpCollectionClient::new(base, Some(std::time::Duration::from_secs(5))).expect("client")
    }

    #[test]
    fn list_gets_collection() {
        let (base, server) = serve_once(
            "200 OK",
            r#"[{"id":1,"name":"A","email":"a@x.com","password":"p"},{"id":2,"name":"B","email":"b@x.com"}]"#,
        );
        let users = client(&base).list().expect("list");
        let seen = server.join().unwrap();
        assert_eq!(seen.method, "GET");
        assert_eq!(seen.path, "/users");
        assert_eq!(users.len(), 2);
        assert_eq!(users[0], User::new("A", "a@x.com", "p").with_id(1));
        assert_eq!(users[1].password, "");
    }

    #[test]
    fn create_posts_json_body_without_id() {
        let (base, server) = serve_once(
            "201 Created",
            r#"{"id":3,"name":"C","email":"c@x.com","password":"p"}"#,
        );
        let created = client(&base)
            .create(&User::new("C", "c@x.com", "p"))
            .expect("create");
        let seen = server.join().unwrap();
        assert_eq!(seen.method, "POST");
        assert_eq!(seen.path, "/users");
        let sent: serde_json::Value = serde_json::from_str(&seen.body).unwrap();
        assert_eq!(sent, serde_json::json!({"name": "C", "email": "c@x.com", "password": "p"}));
        assert_eq!(created, User::new("C", "c@x.com", "p").with_id(3));
    }

    #[test]
    fn update_puts_to_member_url() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"id":3,"name":"Cee","email":"c@x.com","password":"p"}"#,
        );
        let body = User::new("Cee", "c@x.com", "p").with_id(3);
        let updated = client(&format!("{base}/")).update(3, &body).expect("update");
        let seen = server.join().unwrap();
        assert_eq!(seen.method, "PUT");
        assert_eq!(seen.path, "/users/3");
        assert_eq!(updated, body);
    }

    #[test]
    fn remove_ignores_response_body() {
        let (base, server) = serve_once("200 OK", "");
        client(&base).remove(2).expect("remove");
        let seen = server.join().unwrap();
        assert_eq!(seen.method, "DELETE");
        assert_eq!(seen.path, "/users/2");
    }

    #[test]
    fn error_status_is_a_request_failure() {
        let (base, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#);
        let err = client(&base).list().unwrap_err();
        server.join().unwrap();
        assert_eq!(err.operation, Operation::List);
    }

    #[test]
    fn unparsable_body_is_a_request_failure() {
        let (base, server) = serve_once("200 OK", "<html>not json</html>");
        let err = client(&base).create(&User::new("C", "c", "p")).unwrap_err();
        server.join().unwrap();
        assert_eq!(err.operation, Operation::Create);
    }

    #[test]
    fn unreachable_server_is_a_request_failure() {
        // Bind then drop to get a port nobody listens on.
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let err = client(&format!("http://127.0.0.1:{port}")).remove(1).unwrap_err();
        assert_eq!(err.operation, Operation::Delete);
    }
}

#[cfg(test)]
mod list_tests {
    use usrapi_manager::User;
    use usrapi_manager::app::list::UserList;

    fn named(id: u64, name: &str) -> User {
        User::new(name, "", "").with_id(id)
    }

    #[test]
    fn delete_scenario_from_two_records() {
        let mut list = UserList::new(vec![named(1, "A"), named(2, "B")]);
        list.apply_removed(2);
        assert_eq!(list.users, vec![named(1, "A")]);
    }

    #[test]
    fn add_scenario_uses_response_id() {
        let mut list = UserList::new(vec![named(1, "A"), named(2, "B")]);
        let returned = User::new("C", "c@x.com", "p").with_id(3);
        list.apply_created(returned.clone());
        assert_eq!(list.users.last(), Some(&returned));
        assert_eq!(list.len(), 3);
    }
}

#[cfg(test)]
mod form_and_confirm_tests {
    use usrapi_manager::User;
    use usrapi_manager::app::confirm::{ConfirmChoice, Confirmation, PendingAction};
    use usrapi_manager::app::form::{FormField, FormIntent, UserForm};

    #[test]
    fn every_field_is_required() {
        for field in [FormField::Name, FormField::Email, FormField::Password] {
            let mut form = UserForm::for_add();
            form.name = "n".into();
            form.email = "e".into();
            form.password = "p".into();
            form.field_mut(field).unwrap().clear();
            let err = form.validate().unwrap_err();
            assert_eq!(err.missing, vec![field]);
        }
    }

    #[test]
    fn add_and_edit_are_distinct_intents() {
        assert_eq!(UserForm::for_add().intent, FormIntent::Add);
        let edit = UserForm::for_edit(&User::new("A", "a", "p").with_id(4)).unwrap();
        assert_eq!(edit.intent, FormIntent::Edit { id: 4 });
        assert_eq!(edit.title(), "Edit User");
    }

    #[test]
    fn confirmation_resolves_without_ui() {
        let c = Confirmation::delete(7, "Gus");
        assert_eq!(c.title(), "Confirm Delete");
        assert_eq!(c.confirm_label(), "Delete");
        assert_eq!(c.resolve(ConfirmChoice::Cancel), None);
        assert_eq!(
            c.resolve(ConfirmChoice::Confirm),
            Some(PendingAction::Delete { id: 7, name: "Gus".into() })
        );
    }
}

#[cfg(test)]
mod search_tests {
    use usrapi_manager::User;
    use usrapi_manager::search::{filter_users, matches};

    #[test]
    fn match_is_case_insensitive() {
        let u = User::new("Alice", "ALICE@Example.com", "p").with_id(12);
        assert!(matches(&u, "alice"));
        assert!(matches(&u, "example"));
        assert!(matches(&u, "12"));
        assert!(!matches(&u, "bob"));
    }

    #[test]
    fn filter_preserves_list_order() {
        let users = vec![
            User::new("ann", "a@x", "p").with_id(1),
            User::new("bob", "b@x", "p").with_id(2),
            User::new("anna", "c@x", "p").with_id(3),
        ];
        let names: Vec<&str> = filter_users(&users, "ann")
            .iter()
            .map(|u| u.name.as_str())
            .collect();
        assert_eq!(names, vec!["ann", "anna"]);
    }
}
