//! Client route table: path parsing/formatting and page titles for the shell.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Processes,
    ProcessDetail(i64),
    Servers,
    Backups,
    Certificate,
}

impl Route {
    /// Parse a location path. Trailing slashes are tolerated.
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" | "/" => Some(Route::Dashboard),
            "/processos" => Some(Route::Processes),
            "/servidor" => Some(Route::Servers),
            "/backups" => Some(Route::Backups),
            "/certificados" => Some(Route::Certificate),
            _ => {
                let id = trimmed.strip_prefix("/processos/detalhes/")?;
                id.parse().ok().map(Route::ProcessDetail)
            }
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::Processes => "/processos".to_string(),
            Route::ProcessDetail(id) => format!("/processos/detalhes/{id}"),
            Route::Servers => "/servidor".to_string(),
            Route::Backups => "/backups".to_string(),
            Route::Certificate => "/certificados".to_string(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Control panel",
            Route::Processes => "Process management",
            Route::ProcessDetail(_) => "Process details",
            Route::Servers => "Public employees",
            Route::Backups => "Backup manager",
            Route::Certificate => "Digital certificate",
        }
    }
}
