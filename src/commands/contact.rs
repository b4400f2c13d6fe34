// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};

use crate::forms::ContactForm;
use crate::utils::pretty_table;

pub fn handle(sub: &clap::ArgMatches) -> Result<()> {
    let form = ContactForm {
        name: sub.get_one::<String>("name").cloned().unwrap_or_default(),
        email: sub.get_one::<String>("email").cloned().unwrap_or_default(),
        message: sub.get_one::<String>("message").cloned().unwrap_or_default(),
    };
    match form.validate() {
        Ok(()) => {
            println!("Thanks {}, your message has been received.", form.name.trim());
            Ok(())
        }
        Err(errs) => {
            let rows = errs
                .iter()
                .map(|(f, m)| vec![f.to_string(), m.to_string()])
                .collect();
            println!("{}", pretty_table(&["Field", "Problem"], rows));
            bail!("Message not sent ({} field(s) need attention)", errs.len())
        }
    }
}
