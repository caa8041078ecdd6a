//! 도메인 정책(변경 파일 필터, 자동화 계정 식별, 리뷰 지시문 구성).

use crate::domain::binary_extensions::is_binary_extension;

/// 리뷰어 역할과 출력 형식을 고정하는 지시문.
pub const REVIEW_INSTRUCTIONS: &str = "Act as a code reviewer of a Pull Request, providing feedback on possible bugs and clean code issues.
You are provided with the Pull Request changes of a single file in a unified diff format.

As a code reviewer, your task is:
- Review only added, edited or deleted lines.
- Group your findings under the headings Critical, Major and Minor, then finish with General Recommendations.
- Omit a heading when it has no findings.
- If there are no bugs and the changes are correct, write only 'No feedback.'
- If there are bugs or incorrect code changes, don't write 'No feedback.'";

/// 직접 엔드포인트 경로는 지시문과 diff를 하나의 user 메시지로 보낸다.
pub fn combined_prompt(instructions: &str, diff: &str) -> String {
    format!("{instructions}\n\nPatch:\n{diff}")
}

/// 경로의 확장자(점 제외). 점이 없거나 맨 앞에만 있으면 빈 문자열이다.
pub fn file_extension(path: &str) -> &str {
    match path.rfind('.') {
        Some(idx) if idx > 0 => &path[idx + 1..],
        _ => "",
    }
}

/// `git diff --name-only` 출력에서 빈 줄과 바이너리 파일을 제거한다. 순서는 유지한다.
pub fn filter_changed_files(name_only_diff: &str) -> Vec<String> {
    name_only_diff
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !is_binary_extension(file_extension(line)))
        .map(ToString::to_string)
        .collect()
}

/// 호스트가 넘겨준 대상 브랜치(`refs/heads/main`)를 원격 추적 참조(`origin/main`)로 바꾼다.
pub fn target_branch_ref(raw: Option<&str>) -> Option<String> {
    let branch = raw?.trim();
    let branch = branch.strip_prefix("refs/heads/").unwrap_or(branch);
    if branch.is_empty() {
        return None;
    }
    Some(format!("origin/{branch}"))
}

/// 컬렉션 URL에서 조직(컬렉션) 이름을 뽑는다.
/// 레거시 `*.visualstudio.com` 호스트는 서브도메인, 그 외에는 두 번째 경로 조각이다.
pub fn collection_name(collection_uri: &str) -> String {
    let without_scheme = collection_uri
        .replace("https://", "")
        .replace("http://", "");

    if let Some((name, _)) = without_scheme.split_once(".visualstudio.") {
        return name.to_string();
    }

    without_scheme
        .split('/')
        .nth(1)
        .unwrap_or_default()
        .to_string()
}

/// 이 태스크가 남긴 코멘트의 작성자 표시 이름.
pub fn automation_identity(project: &str, collection_uri: &str) -> String {
    format!(
        "{} Build Service ({})",
        project,
        collection_name(collection_uri)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_files_are_dropped_and_order_is_kept() {
        assert_eq!(
            filter_changed_files("file1.txt\nfile2.jpg\nfile3.txt"),
            vec!["file1.txt", "file3.txt"]
        );
    }

    #[test]
    fn empty_diff_yields_no_files() {
        assert!(filter_changed_files("").is_empty());
        assert!(filter_changed_files("\n\n  \n").is_empty());
    }

    #[test]
    fn unknown_extensions_and_extensionless_files_are_kept() {
        assert_eq!(
            filter_changed_files("file1.txt\nfile4.xyz"),
            vec!["file1.txt", "file4.xyz"]
        );
        assert_eq!(
            filter_changed_files("Makefile\n\nsrc/.gitignore\n"),
            vec!["Makefile", "src/.gitignore"]
        );
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        assert_eq!(filter_changed_files("logo.PNG\nlogo.png"), vec!["logo.PNG"]);
    }

    #[test]
    fn extension_rules() {
        assert_eq!(file_extension("a/b/c.rs"), "rs");
        assert_eq!(file_extension("archive.tar.gz"), "gz");
        assert_eq!(file_extension("README"), "");
        assert_eq!(file_extension(".env"), "");
    }

    #[test]
    fn target_branch_is_prefixed_with_origin() {
        assert_eq!(
            target_branch_ref(Some("refs/heads/main")).as_deref(),
            Some("origin/main")
        );
        assert_eq!(
            target_branch_ref(Some("release/1.2")).as_deref(),
            Some("origin/release/1.2")
        );
        assert_eq!(target_branch_ref(Some("refs/heads/")), None);
        assert_eq!(target_branch_ref(Some("")), None);
        assert_eq!(target_branch_ref(None), None);
    }

    #[test]
    fn collection_name_from_modern_and_legacy_urls() {
        assert_eq!(collection_name("https://dev.azure.com/ExampleOrg/"), "ExampleOrg");
        assert_eq!(collection_name("https://org.visualstudio.com/Project"), "org");
        assert_eq!(collection_name("http://tfs.local/DefaultCollection/"), "DefaultCollection");
        assert_eq!(collection_name("https://dev.azure.com"), "");
    }

    #[test]
    fn automation_identity_format() {
        assert_eq!(
            automation_identity("Shop", "https://dev.azure.com/ExampleOrg/"),
            "Shop Build Service (ExampleOrg)"
        );
    }

    #[test]
    fn combined_prompt_keeps_instructions_before_diff() {
        let prompt = combined_prompt("review this", "+fn main() {}");
        assert!(prompt.starts_with("review this"));
        assert!(prompt.ends_with("+fn main() {}"));
    }
}
