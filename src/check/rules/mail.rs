//! Mail transport reachability.
//!
//! Windows hosts deliver mail through an SMTP relay named by the `SMTP` and
//! `smtp_port` settings. Everywhere else the runtime pipes mail into the
//! local program named by `sendmail_path`.

use std::net::IpAddr;
use std::path::Path;

use crate::check::measure::parse_number;
use crate::check::{CheckRule, RuleId, Status};
use crate::environment::Environment;

const TEST_HINT: &str =
    "Once the installation is complete, mail delivery can be tested in the install tool.";

pub struct MailTransportRule;

impl MailTransportRule {
    fn check_smtp(&self, env: &dyn Environment) -> Status {
        let host = env.config_value("SMTP");
        let port = env.config_value("smtp_port");
        let address: Option<IpAddr> = env.resolve_host(&host);
        let port_ok = (1..=65535).contains(&parse_number(&port));

        match address {
            Some(ip) if port_ok && ip.is_loopback() => {
                Status::warning("Mail relay is this host").with_message(format!(
                    "SMTP={} resolves to {}, which is likely not a real mail relay. Make \
                     sure an SMTP server runs here. {}",
                    host, ip, TEST_HINT
                ))
            }
            Some(_) if port_ok => Status::ok("Mail is configured").with_message(format!(
                "SMTP={}, smtp_port={}. The values look fine. {}",
                host, port, TEST_HINT
            )),
            _ => Status::error("Mail configuration is not set correctly").with_message(format!(
                "SMTP={}, smtp_port={}. On Windows, mail() needs SMTP to be an address or \
                 a resolvable host name, and smtp_port to be between 1 and 65535. {}",
                host, port, TEST_HINT
            )),
        }
    }

    fn check_sendmail(&self, env: &dyn Environment) -> Status {
        let sendmail = env.config_value("sendmail_path");
        let Some(program) = sendmail.split_whitespace().next() else {
            return Status::warning("No local mail transport configured").with_message(format!(
                "sendmail_path is not set. This is an uncommon setup and may break mail(). {}",
                TEST_HINT
            ));
        };

        if env.is_executable(Path::new(program)) {
            Status::ok("Mail program is configured").with_message(format!(
                "sendmail_path = {}. The value looks fine. {}",
                sendmail, TEST_HINT
            ))
        } else {
            Status::error("Mail program not found or not executable").with_message(format!(
                "sendmail_path = {}. {} does not exist or may not be executed, so mail() \
                 will fail. {}",
                sendmail, program, TEST_HINT
            ))
        }
    }
}

impl CheckRule for MailTransportRule {
    fn id(&self) -> RuleId {
        RuleId::new("mail-transport")
    }

    fn name(&self) -> &str {
        "Mail Transport"
    }

    fn description(&self) -> &str {
        "Checks the SMTP relay on Windows or the sendmail program elsewhere"
    }

    fn evaluate(&self, env: &dyn Environment) -> Status {
        if env.os_family().is_windows() {
            self.check_smtp(env)
        } else {
            self.check_sendmail(env)
        }
    }
}
