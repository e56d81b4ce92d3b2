#[cfg(test)]
mod tests {
    use atende::libs::atendimento::{AtendimentoUpdate, Modalidade, NovoAtendimento};
    use atende::libs::validation::{
        parse_data, parse_hora, parse_modalidade, parse_status, safe_filename, sanitize_input, validate_novo, validate_pdf,
        validate_update, ValidationError, MAX_OBSERVACOES_LEN, MAX_PDF_SIZE, MAX_TEXT_LEN,
    };
    use chrono::NaiveDate;

    fn novo() -> NovoAtendimento {
        NovoAtendimento {
            empresa: "Alpha Ltda".to_string(),
            nome: "Maria Silva".to_string(),
            modalidade: "Admissional".to_string(),
            data: "04/09/2025".to_string(),
            hora: "09:00".to_string(),
            status: None,
            observacoes: None,
        }
    }

    #[test]
    fn test_sanitize_strips_injection_characters() {
        assert_eq!(sanitize_input("<script>alert('x')</script>", MAX_TEXT_LEN), "scriptalert(x)/script");
        assert_eq!(sanitize_input("Robert\"; DROP TABLE atendimentos;--", MAX_TEXT_LEN), "Robert DROP TABLE atendimentos--");
        assert_eq!(sanitize_input("A & B", MAX_TEXT_LEN), "A B");
    }

    #[test]
    fn test_sanitize_collapses_whitespace_and_truncates() {
        assert_eq!(sanitize_input("  Alpha    Ltda  ", MAX_TEXT_LEN), "Alpha Ltda");
        assert_eq!(sanitize_input("abcdef", 3), "abc");
        // Accented names survive untouched
        assert_eq!(sanitize_input("João Conceição", MAX_TEXT_LEN), "João Conceição");
    }

    #[test]
    fn test_parse_data() {
        assert_eq!(parse_data("04/09/2025").unwrap(), NaiveDate::from_ymd_opt(2025, 9, 4).unwrap());
        assert_eq!(parse_data(" 04/09/2025 ").unwrap(), NaiveDate::from_ymd_opt(2025, 9, 4).unwrap());

        assert!(matches!(parse_data("2025-09-04"), Err(ValidationError::InvalidDate(_))));
        assert!(matches!(parse_data("31/02/2025"), Err(ValidationError::InvalidDate(_))));
        assert!(matches!(parse_data(""), Err(ValidationError::InvalidDate(_))));
    }

    #[test]
    fn test_parse_hora() {
        assert_eq!(parse_hora("09:00").unwrap().format("%H:%M").to_string(), "09:00");
        assert_eq!(parse_hora("23:59").unwrap().format("%H:%M").to_string(), "23:59");

        assert!(matches!(parse_hora("25:00"), Err(ValidationError::InvalidTime(_))));
        assert!(matches!(parse_hora("9h30"), Err(ValidationError::InvalidTime(_))));
    }

    #[test]
    fn test_parse_modalidade() {
        assert_eq!(parse_modalidade("Admissional").unwrap(), Modalidade::Admissional);
        // Both accented and plain spellings are accepted
        assert_eq!(parse_modalidade("Periódico").unwrap(), Modalidade::Periodico);
        assert_eq!(parse_modalidade("Periodico").unwrap(), Modalidade::Periodico);

        assert!(matches!(parse_modalidade("Consulta"), Err(ValidationError::UnknownModalidade(_))));
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("Pendente").unwrap(), "Pendente");
        assert_eq!(parse_status("Concluído").unwrap(), "Concluído");
        assert!(matches!(parse_status("Arquivado"), Err(ValidationError::UnknownStatus(_))));
    }

    #[test]
    fn test_validate_novo() {
        let at = validate_novo(&novo()).unwrap();
        assert_eq!(at.empresa, "Alpha Ltda");
        assert_eq!(at.modalidade, Modalidade::Admissional);
        assert_eq!(at.status, "Pendente");
        assert!(at.observacoes.is_none());
    }

    #[test]
    fn test_validate_novo_sanitizes_fields() {
        let mut payload = novo();
        payload.nome = "<b>Maria</b>   Silva".to_string();
        payload.observacoes = Some("  obs;  ".to_string());

        let at = validate_novo(&payload).unwrap();
        assert_eq!(at.nome, "bMaria/b Silva");
        assert_eq!(at.observacoes.as_deref(), Some("obs"));
    }

    #[test]
    fn test_validate_novo_rejects_empty_after_sanitization() {
        let mut payload = novo();
        payload.empresa = "<>&;".to_string();
        assert!(matches!(validate_novo(&payload), Err(ValidationError::Required("empresa"))));
    }

    #[test]
    fn test_validate_novo_rejects_bad_fields() {
        let mut payload = novo();
        payload.data = "04-09-2025".to_string();
        assert!(matches!(validate_novo(&payload), Err(ValidationError::InvalidDate(_))));

        let mut payload = novo();
        payload.status = Some("Inventado".to_string());
        assert!(matches!(validate_novo(&payload), Err(ValidationError::UnknownStatus(_))));
    }

    #[test]
    fn test_validate_novo_truncates_observacoes() {
        let mut payload = novo();
        payload.observacoes = Some("x".repeat(MAX_OBSERVACOES_LEN + 50));
        let at = validate_novo(&payload).unwrap();
        assert_eq!(at.observacoes.unwrap().chars().count(), MAX_OBSERVACOES_LEN);
    }

    #[test]
    fn test_validate_update() {
        let update = AtendimentoUpdate {
            nome: Some("Maria Souza".to_string()),
            status: Some("Concluído".to_string()),
            ..Default::default()
        };
        let patch = validate_update(&update).unwrap();
        assert_eq!(patch.nome.as_deref(), Some("Maria Souza"));
        assert_eq!(patch.status.as_deref(), Some("Concluído"));
        assert!(patch.empresa.is_none());
    }

    #[test]
    fn test_validate_update_rejects_empty() {
        assert!(matches!(validate_update(&AtendimentoUpdate::default()), Err(ValidationError::EmptyUpdate)));
    }

    #[test]
    fn test_validate_pdf_magic() {
        assert!(validate_pdf(b"%PDF-1.4 conteudo").is_ok());
        assert!(matches!(validate_pdf(b"PK\x03\x04 zip"), Err(ValidationError::NotAPdf)));
        assert!(matches!(validate_pdf(b""), Err(ValidationError::NotAPdf)));
    }

    #[test]
    fn test_validate_pdf_size_limit() {
        let mut big = b"%PDF-1.4 ".to_vec();
        big.resize(MAX_PDF_SIZE + 1, b'a');
        assert!(matches!(validate_pdf(&big), Err(ValidationError::PdfTooLarge(10))));
    }

    #[test]
    fn test_validate_pdf_disallowed_elements() {
        assert!(matches!(
            validate_pdf(b"%PDF-1.4 /JavaScript (app.alert)"),
            Err(ValidationError::PdfDisallowedContent("/JavaScript"))
        ));
        assert!(matches!(
            validate_pdf(b"%PDF-1.4 <</OpenAction 2 0 R>>"),
            Err(ValidationError::PdfDisallowedContent("/OpenAction"))
        ));
        assert!(matches!(
            validate_pdf(b"%PDF-1.4 /Launch (cmd)"),
            Err(ValidationError::PdfDisallowedContent("/Launch"))
        ));
    }

    #[test]
    fn test_safe_filename() {
        let name = safe_filename("laudo final (2).pdf");
        // Timestamp prefix followed by the cleaned base name
        assert!(name.ends_with("laudo_final__2_.pdf"));
        assert_eq!(name.len(), "20250904_090012_".len() + "laudo_final__2_.pdf".len());
    }

    #[test]
    fn test_safe_filename_strips_directories() {
        let name = safe_filename("../../etc/passwd");
        assert!(name.ends_with("passwd"));
        assert!(!name.contains('/'));
        assert!(!name.contains(".."));

        let name = safe_filename("");
        assert!(name.ends_with("arquivo.pdf"));
    }
}
