#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub code_num: u16,
    pub message: &'static str,
}

impl Status {
    pub const OK: Status = Status {
        code_num: 200,
        message: "OK",
    };
    pub const NO_CONTENT: Status = Status {
        code_num: 204,
        message: "No Content",
    };
    pub const BAD_REQUEST: Status = Status {
        code_num: 400,
        message: "Bad Request",
    };
    pub const UNAUTHORIZED: Status = Status {
        code_num: 401,
        message: "Unauthorized",
    };
    pub const FORBIDDEN: Status = Status {
        code_num: 403,
        message: "Forbidden",
    };
    pub const NOT_FOUND: Status = Status {
        code_num: 404,
        message: "Not Found",
    };
    pub const METHOD_NOT_ALLOWED: Status = Status {
        code_num: 405,
        message: "Method Not Allowed",
    };
    pub const NOT_ACCEPTABLE: Status = Status {
        code_num: 406,
        message: "Not Acceptable",
    };
    pub const INTERNAL_SERVER_ERROR: Status = Status {
        code_num: 500,
        message: "Internal Server Error",
    };

    const KNOWN: [Status; 9] = [
        Status::OK,
        Status::NO_CONTENT,
        Status::BAD_REQUEST,
        Status::UNAUTHORIZED,
        Status::FORBIDDEN,
        Status::NOT_FOUND,
        Status::METHOD_NOT_ALLOWED,
        Status::NOT_ACCEPTABLE,
        Status::INTERNAL_SERVER_ERROR,
    ];

    /// Looks up the reason phrase for `code`.
    ///
    /// Codes outside the table keep their number but are labelled
    /// "Internal Server Error", so a 201 goes out as `201 Internal Server Error`.
    pub fn from_code(code: u16) -> Status {
        Self::KNOWN
            .iter()
            .copied()
            .find(|s| s.code_num == code)
            .unwrap_or(Status {
                code_num: code,
                message: Status::INTERNAL_SERVER_ERROR.message,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_their_phrase() {
        assert_eq!(Status::from_code(200).message, "OK");
        assert_eq!(Status::from_code(204).message, "No Content");
        assert_eq!(Status::from_code(400).message, "Bad Request");
        assert_eq!(Status::from_code(401).message, "Unauthorized");
        assert_eq!(Status::from_code(403).message, "Forbidden");
        assert_eq!(Status::from_code(404).message, "Not Found");
        assert_eq!(Status::from_code(405).message, "Method Not Allowed");
        assert_eq!(Status::from_code(406).message, "Not Acceptable");
    }

    #[test]
    fn unknown_codes_fall_back_to_server_error_phrase() {
        for code in [201, 301, 418, 500, 503] {
            let status = Status::from_code(code);
            assert_eq!(status.code_num, code);
            assert_eq!(status.message, "Internal Server Error");
        }
    }
}
