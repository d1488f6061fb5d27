//! Prompt builders, one per generation task.

pub fn ideation(topic: &str) -> String {
    format!(
        r#"You are a viral content strategist. Generate 5 highly-optimized video ideas for: "{topic}".
For each idea, provide:
1. A "Psychological Hook" (to stop the scroll)
2. "Retention-Focused Content" (core value)
3. "Conversion CTA" (specific action)
Format the response in beautiful Markdown with icons."#
    )
}

pub fn tagging(content: &str) -> String {
    format!(
        r#"Analyze this content: "{content}".
Generate a precision-targeted hashtag strategy:
- 5 Viral (1M+ posts)
- 10 Growth (100k-500k posts)
- 15 Niche (Specific to the topic)
Explain why this strategy works for the current algorithm."#
    )
}

pub fn codegen(prompt: &str, language: &str) -> String {
    format!(
        r#"Act as a Staff Software Engineer. Write production-ready, highly-optimized {language} code for: "{prompt}".
Requirements:
- Clean code principles
- Error handling
- Performance considerations
- Concise comments"#
    )
}

pub fn resume_analysis(cv_text: &str) -> String {
    format!(
        r#"Analyze this professional resume. Evaluate the candidate against modern industry standards.
Return the analysis strictly in JSON format.
CV Text: "{cv_text}""#
    )
}

pub const OCR: &str = "Please perform a high-precision OCR. Focus on preserving data tables, \
     numbered lists, and bold headings. Return in Markdown.";
