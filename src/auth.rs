use anyhow::{Result, bail};
use std::io::{self, BufRead, IsTerminal};
use tracing::debug;
use zeroize::Zeroizing;

pub const PASSWORD_ENV: &str = "SALTNEST_PASSWORD";

/// Reads the password to hash or verify.
///
/// An empty password is accepted when supplied explicitly, as an empty
/// variable or an empty line. Closed stdin with no line at all is an error.
pub fn read_password() -> Result<Zeroizing<String>> {
    //  Environment Variable
    //  SALTNEST_PASSWORD="hunter2" saltnest hash
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        debug!("password read from {PASSWORD_ENV}");
        return Ok(Zeroizing::new(pw));
    }

    //  stdin (Pipeline)
    //  printf "%s\n" "hunter2" | saltnest verify --record user.json
    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        if io::stdin().lock().read_line(&mut buf)? == 0 {
            bail!("no password provided");
        }
        trim_newline(&mut buf);
        debug!("password read from stdin");
        return Ok(buf);
    }

    Ok(Zeroizing::new(rpassword::prompt_password("Password: ")?))
}

/// Like [`read_password`], but asks twice on an interactive terminal.
pub fn read_new_password_with_confirmation() -> Result<Zeroizing<String>> {
    if std::env::var_os(PASSWORD_ENV).is_some() || !io::stdin().is_terminal() {
        return read_password();
    }

    let pw1 = Zeroizing::new(rpassword::prompt_password("New password: ")?);
    let pw2 = Zeroizing::new(rpassword::prompt_password("Confirm password: ")?);

    if pw1 != pw2 {
        bail!("passwords do not match");
    }

    Ok(pw1)
}

fn trim_newline(s: &mut String) {
    while s.ends_with('\n') || s.ends_with('\r') {
        s.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_newline_strips_line_endings_only() {
        let mut s = String::from(" pw \r\n");
        trim_newline(&mut s);
        assert_eq!(s, " pw ");

        let mut empty = String::from("\n");
        trim_newline(&mut empty);
        assert_eq!(empty, "");
    }
}
