//! HTML statistics dashboard.

use crate::error::RepositoryError;
use crate::models::ServiceInfo;
use crate::models::click::Model as ClickModel;
use crate::repositories::TrackingStore;

/// Number of clicks listed on the dashboard.
pub const RECENT_CLICKS_LIMIT: u64 = 10;

/// Point-in-time counts and latest clicks.
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub total_clients: u64,
    pub total_clicks: u64,
    pub total_webhooks: u64,
    pub recent_clicks: Vec<ClickModel>,
}

impl DashboardSnapshot {
    pub async fn load(store: &dyn TrackingStore) -> Result<Self, RepositoryError> {
        Ok(Self {
            total_clients: store.count_clients().await?,
            total_clicks: store.count_clicks().await?,
            total_webhooks: store.count_webhooks().await?,
            recent_clicks: store.recent_clicks(RECENT_CLICKS_LIMIT).await?,
        })
    }
}

pub fn render(snapshot: &DashboardSnapshot) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<title>Dashboard Kolmeya Webhook</title>\n");
    html.push_str("<style>\n");
    html.push_str("  body { font-family: Arial, sans-serif; margin: 20px; background-color: #f5f5f5; }\n");
    html.push_str("  .container { max-width: 1200px; margin: 0 auto; }\n");
    html.push_str("  .card { background: white; padding: 20px; margin: 10px 0; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }\n");
    html.push_str("  .stats { display: flex; gap: 20px; margin-bottom: 20px; }\n");
    html.push_str("  .stat-card { flex: 1; text-align: center; padding: 20px; background: #007bff; color: white; border-radius: 8px; }\n");
    html.push_str("  .stat-number { font-size: 2em; font-weight: bold; }\n");
    html.push_str("  .stat-label { font-size: 0.9em; opacity: 0.9; }\n");
    html.push_str("  table { width: 100%; border-collapse: collapse; }\n");
    html.push_str("  th, td { padding: 12px; text-align: left; border-bottom: 1px solid #ddd; }\n");
    html.push_str("  th { background-color: #f8f9fa; font-weight: bold; }\n");
    html.push_str("  form { display: flex; gap: 10px; flex-wrap: wrap; }\n");
    html.push_str("  input { padding: 8px; border: 1px solid #ddd; border-radius: 4px; }\n");
    html.push_str("  .btn { background: #007bff; color: white; padding: 10px 20px; border: none; border-radius: 5px; }\n");
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n<div class=\"container\">\n");
    html.push_str("<h1>Dashboard Kolmeya Webhook</h1>\n");

    html.push_str("<div class=\"stats\">\n");
    write_stat(&mut html, "Total de Clientes", snapshot.total_clients);
    write_stat(&mut html, "Total de Cliques", snapshot.total_clicks);
    write_stat(&mut html, "Webhooks Recebidos", snapshot.total_webhooks);
    html.push_str("</div>\n");

    html.push_str("<div class=\"card\">\n<h2>Testar Envio de SMS</h2>\n");
    html.push_str("<form action=\"/enviar-sms\" method=\"post\">\n");
    html.push_str("<input type=\"text\" name=\"telefone\" placeholder=\"Telefone (5511999999999)\" required>\n");
    html.push_str("<input type=\"text\" name=\"nome\" placeholder=\"Nome\" required>\n");
    html.push_str("<input type=\"text\" name=\"cpf\" placeholder=\"CPF\" required>\n");
    html.push_str("<input type=\"text\" name=\"mensagem\" placeholder=\"Mensagem\" required>\n");
    html.push_str("<button type=\"submit\" class=\"btn\">Enviar SMS</button>\n");
    html.push_str("</form>\n");
    html.push_str("<p>Este formulário usa form data. Para usar JSON, envie uma requisição POST com Content-Type: application/json</p>\n");
    html.push_str("</div>\n");

    html.push_str("<div class=\"card\">\n<h2>Últimos Cliques</h2>\n");
    html.push_str("<table>\n<thead><tr><th>Nome</th><th>CPF</th><th>Telefone</th><th>Data do Clique</th></tr></thead>\n<tbody>\n");
    for click in &snapshot.recent_clicks {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(click.name.as_deref().unwrap_or("")),
            escape_html(click.national_id.as_deref().unwrap_or("")),
            escape_html(click.phone.as_deref().unwrap_or("")),
            click.clicked_at.format("%Y-%m-%d %H:%M:%S"),
        ));
    }
    html.push_str("</tbody></table>\n</div>\n");

    html.push_str("<div class=\"card\">\n<h2>Endpoints Disponíveis</h2>\n");
    for (endpoint, description) in &ServiceInfo::default().endpoints {
        html.push_str(&format!(
            "<p><strong>{}</strong> - {}</p>\n",
            escape_html(endpoint),
            escape_html(description),
        ));
    }
    html.push_str("</div>\n");

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn write_stat(html: &mut String, label: &str, value: u64) {
    html.push_str(&format!(
        "<div class=\"stat-card\"><div class=\"stat-number\">{}</div><div class=\"stat-label\">{}</div></div>\n",
        value, label
    ));
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
